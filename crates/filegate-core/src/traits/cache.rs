//! URL cache trait for pluggable caching backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{FileType, PresignedUrl, cache_key, upload_cache_key};

/// Trait for presigned URL caches (in-process or Redis).
///
/// Both backends behave identically from the caller's side: an entry is
/// visible until its TTL elapses, overwrites are unconditional, and deleting
/// a missing key succeeds.
#[async_trait]
pub trait UrlCache: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., `"memory"`, `"redis"`).
    fn backend(&self) -> &str;

    /// Get a cached URL. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<PresignedUrl>>;

    /// Store a URL, replacing any existing entry. The backend's own expiry is
    /// `now + ttl`, independent of `value.expires_at`.
    async fn set(&self, key: &str, value: &PresignedUrl, ttl: Duration) -> AppResult<()>;

    /// Remove an entry. A missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Derive the cache key for an object's download URL.
    fn generate_key(&self, file_type: FileType, file_id: &str) -> String {
        cache_key(file_type, file_id)
    }

    /// Derive the cache key for an object's upload URL.
    fn generate_upload_key(&self, file_type: FileType, file_id: &str) -> String {
        upload_cache_key(file_type, file_id)
    }

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
