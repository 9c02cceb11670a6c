//! API key middleware for the `/api/v1` routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use filegate_core::error::AppError;

use super::cors::API_KEY_HEADER;
use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests whose `X-API-Key` header does not match the configured
/// key. An empty configured key disables the check.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = state.config.security.api_key.as_str();
    if expected.is_empty() {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(next.run(request).await),
        Some(_) => Err(AppError::unauthorized("Invalid API key").into()),
        None => Err(AppError::unauthorized("Missing API key").into()),
    }
}
