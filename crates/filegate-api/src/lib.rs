//! # filegate-api
//!
//! HTTP API layer for FileGate built on Axum.
//!
//! Exposes the file coordination service as REST endpoints under `/api/v1`,
//! plus health checks, with API-key, CORS and request-logging middleware.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
