//! Route definitions for the FileGate HTTP API.
//!
//! File routes live under `/api/v1` behind the API-key check; health routes
//! are always open. The router receives `AppState` and passes it to all
//! handlers via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.security);

    Router::new()
        .merge(file_routes(&state))
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Presigned URL issuance, existence checks and deletion
fn file_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/upload-url", post(handlers::file::issue_upload_url))
        .route("/api/v1/download-url", get(handlers::file::issue_download_url))
        .route("/api/v1/exists", get(handlers::file::check_exists))
        .route("/api/v1", delete(handlers::file::delete_file))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ))
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
