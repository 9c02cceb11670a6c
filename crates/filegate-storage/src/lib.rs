//! # filegate-storage
//!
//! Object store implementations for FileGate: an S3-compatible provider
//! built on the AWS SDK (works against AWS S3 and MinIO), and an in-process
//! provider for local development and tests.

pub mod manager;
pub mod providers;
pub mod rewrite;

pub use manager::StorageManager;
pub use rewrite::ProxyRewriter;
