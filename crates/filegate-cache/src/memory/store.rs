//! In-memory URL cache backed by a lock-guarded map.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use filegate_core::result::AppResult;
use filegate_core::traits::cache::UrlCache;
use filegate_core::types::PresignedUrl;

/// A cached URL with the backend's own deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: PresignedUrl,
    expires_at: Instant,
}

impl CacheEntry {
    /// An entry is dead once either its own deadline or the URL's expiry passed.
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at || self.value.is_expired()
    }
}

/// In-process URL cache.
///
/// Expiry is enforced on read; there is no background sweeper. The lock only
/// ever guards the map itself and is never held across an await on I/O.
#[derive(Debug, Default)]
pub struct MemoryUrlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryUrlCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including expired ones not yet read.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the map holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl UrlCache for MemoryUrlCache {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> AppResult<Option<PresignedUrl>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(Instant::now()) => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
            }
        }

        // Expired under the read lock. Re-check under the write lock: another
        // task may have removed or refreshed the entry in between.
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(Instant::now()))
        {
            entries.remove(key);
            debug!(key, "Removed expired cache entry");
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &PresignedUrl, ttl: Duration) -> AppResult<()> {
        let entry = CacheEntry {
            value: value.clone(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
