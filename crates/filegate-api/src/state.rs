//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use filegate_cache::UrlCacheManager;
use filegate_core::config::AppConfig;
use filegate_service::{FileService, InMemoryMetrics, OperationContext};
use filegate_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// URL cache (Redis or in-memory)
    pub cache: Arc<UrlCacheManager>,
    /// Object store (S3 or in-memory)
    pub storage: Arc<StorageManager>,
    /// Counters shown on `/health/detailed`
    pub metrics: Arc<InMemoryMetrics>,
    /// File coordination service
    pub file_service: Arc<FileService>,
    /// Cancelled when in-flight operations must be abandoned on shutdown
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Wire the file service to the given cache and store.
    pub fn new(
        config: AppConfig,
        cache: Arc<UrlCacheManager>,
        storage: Arc<StorageManager>,
        shutdown: CancellationToken,
    ) -> Self {
        let metrics = Arc::new(InMemoryMetrics::new());
        let file_service = Arc::new(FileService::new(
            storage.clone(),
            cache.clone(),
            metrics.clone(),
        ));
        Self {
            config: Arc::new(config),
            cache,
            storage,
            metrics,
            file_service,
            shutdown,
        }
    }

    /// Context for one request: bounded by the request timeout and
    /// cancelled with the server.
    pub fn operation_context(&self) -> OperationContext {
        let timeout = Duration::from_secs(self.config.server.request_timeout_seconds);
        OperationContext::with_token(self.shutdown.child_token()).deadline(Instant::now() + timeout)
    }
}
