//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use filegate_core::result::AppResult;
use filegate_core::traits::cache::UrlCache;
use filegate_core::traits::storage::ObjectStore;

use crate::dto::response::{ComponentHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "filegate".to_string(),
    })
}

/// GET /health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<DetailedHealthResponse>) {
    let ctx = state.operation_context();
    let cache = component(
        state.cache.backend(),
        ctx.run(state.cache.health_check()).await,
    );
    let storage = component(
        state.storage.provider_type(),
        ctx.run(state.storage.health_check()).await,
    );

    let healthy = cache.status == "connected" && storage.status == "connected";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = DetailedHealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache,
        storage,
        metrics: state.metrics.snapshot(),
    };
    (status, Json(body))
}

fn component(provider: &str, result: AppResult<bool>) -> ComponentHealth {
    let status = match result {
        Ok(true) => "connected",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(provider, error = %e, "Health check failed");
            "unavailable"
        }
    };
    ComponentHealth {
        provider: provider.to_string(),
        status: status.to_string(),
    }
}
