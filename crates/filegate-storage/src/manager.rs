//! Storage manager: wraps the object store selected by configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use filegate_core::config::storage::StorageConfig;
use filegate_core::error::AppError;
use filegate_core::result::AppResult;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::{FileId, FileType, PresignedUrl};

/// Holds the active object store.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// The active provider.
    inner: Arc<dyn ObjectStore>,
}

impl StorageManager {
    /// Build the configured provider. For `"s3"` the configured buckets are
    /// provisioned before the manager is returned.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn ObjectStore> = match config.provider.as_str() {
            #[cfg(feature = "s3")]
            "s3" => {
                let store = crate::providers::S3ObjectStore::new(config).await?;
                store.provision_buckets().await?;
                Arc::new(store)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(provider = "memory", "Initializing in-memory object store");
                Arc::new(crate::providers::MemoryObjectStore::new(config))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: s3, memory"
                )));
            }
        };

        info!(
            provider = inner.provider_type(),
            presign_expiry_secs = config.presign_expiry_seconds,
            "Object store ready"
        );
        Ok(Self { inner })
    }

    /// Wrap an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn ObjectStore>) -> Self {
        Self { inner: provider }
    }

    /// Get a reference to the active provider.
    pub fn provider(&self) -> &dyn ObjectStore {
        self.inner.as_ref()
    }
}

#[async_trait]
impl ObjectStore for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    fn presign_expiry(&self) -> Duration {
        self.inner.presign_expiry()
    }

    async fn presign_put(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        self.inner.presign_put(file_type, file_id).await
    }

    async fn presign_get(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        self.inner.presign_get(file_type, file_id).await
    }

    async fn exists(&self, file_type: FileType, file_id: &FileId) -> AppResult<bool> {
        self.inner.exists(file_type, file_id).await
    }

    async fn delete(&self, file_type: FileType, file_id: &FileId) -> AppResult<()> {
        self.inner.delete(file_type, file_id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
