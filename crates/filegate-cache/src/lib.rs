//! # filegate-cache
//!
//! Presigned URL cache implementations for FileGate. Supports two modes:
//!
//! - **memory**: In-process map behind a reader/writer lock, expired on read
//! - **redis**: Shared Redis store with native per-key expiry
//!
//! The backend is selected once at startup based on configuration.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::UrlCacheManager;
