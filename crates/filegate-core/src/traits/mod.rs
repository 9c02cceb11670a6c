//! Core traits defined in `filegate-core` and implemented by other crates.

pub mod cache;
pub mod metrics;
pub mod storage;

pub use cache::UrlCache;
pub use metrics::MetricsSink;
pub use storage::ObjectStore;
