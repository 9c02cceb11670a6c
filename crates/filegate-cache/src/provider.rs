//! Cache manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use filegate_core::config::cache::CacheConfig;
use filegate_core::error::AppError;
use filegate_core::result::AppResult;
use filegate_core::traits::cache::UrlCache;
use filegate_core::types::PresignedUrl;

/// URL cache manager that wraps the configured backend.
///
/// The backend is selected once at construction time; there is no
/// switching while the process runs.
#[derive(Debug, Clone)]
pub struct UrlCacheManager {
    /// The inner cache backend.
    inner: Arc<dyn UrlCache>,
}

impl UrlCacheManager {
    /// Create a new cache manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn UrlCache> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!(provider = "redis", "Initializing Redis URL cache");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisUrlCache::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(provider = "memory", "Initializing in-memory URL cache");
                Arc::new(crate::memory::MemoryUrlCache::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a cache manager from an existing backend (for testing).
    pub fn from_provider(provider: Arc<dyn UrlCache>) -> Self {
        Self { inner: provider }
    }

    /// Get a reference to the inner backend.
    pub fn provider(&self) -> &dyn UrlCache {
        self.inner.as_ref()
    }
}

#[async_trait]
impl UrlCache for UrlCacheManager {
    fn backend(&self) -> &str {
        self.inner.backend()
    }

    async fn get(&self, key: &str) -> AppResult<Option<PresignedUrl>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &PresignedUrl, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filegate_core::error::ErrorKind;

    #[tokio::test]
    async fn test_memory_provider_selected() {
        let config = CacheConfig::default();
        let manager = UrlCacheManager::new(&config).await.unwrap();
        assert_eq!(manager.backend(), "memory");
        assert!(manager.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = CacheConfig {
            provider: "memcached".to_string(),
            ..CacheConfig::default()
        };
        let err = UrlCacheManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
