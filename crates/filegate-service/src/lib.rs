//! # filegate-service
//!
//! Coordination layer for FileGate. [`FileService`] combines an object store
//! and a URL cache to issue presigned upload and download URLs, check object
//! existence, and delete objects.
//!
//! Collaborators are injected at construction time as `Arc<dyn Trait>`;
//! every call into them goes through an [`OperationContext`] so a caller can
//! cancel or bound the whole operation.

pub mod context;
pub mod file;
pub mod metrics;

pub use context::OperationContext;
pub use file::{FileService, UploadTicket};
pub use metrics::{InMemoryMetrics, MetricsSnapshot, NoopMetrics};
