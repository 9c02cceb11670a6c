//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filegate_service::{MetricsSnapshot, UploadTicket};

/// Response of `POST /api/v1/upload-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    /// Presigned PUT URL.
    pub url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Id the object will be stored under.
    pub file_id: String,
}

impl From<UploadTicket> for UploadUrlResponse {
    fn from(ticket: UploadTicket) -> Self {
        Self {
            url: ticket.url,
            expires_at: ticket.expires_at,
            file_id: ticket.file_id.into_string(),
        }
    }
}

/// Response of `GET /api/v1/exists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Whether the object is present in the store.
    pub exists: bool,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process answers.
    pub status: String,
    /// Service name.
    pub service: String,
}

/// Health of one backing component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Provider name (`"redis"`, `"s3"`, ...).
    pub provider: String,
    /// `"connected"` or `"unavailable"`.
    pub status: String,
}

/// Readiness response with backend status and counters.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    /// `"healthy"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// URL cache health.
    pub cache: ComponentHealth,
    /// Object store health.
    pub storage: ComponentHealth,
    /// Counter snapshot.
    pub metrics: MetricsSnapshot,
}
