//! In-process object store for local development and tests.
//!
//! Objects are tracked by `(bucket, key)` only; no bytes are kept. Minted
//! URLs look like real path-style S3 URLs but carry no signature.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use filegate_core::config::storage::StorageConfig;
use filegate_core::result::AppResult;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::{FileId, FileType, PresignedUrl};

use crate::rewrite::ProxyRewriter;

/// Per-operation call counters.
#[derive(Debug, Default)]
struct CallCounters {
    presign_put: AtomicU64,
    presign_get: AtomicU64,
    exists: AtomicU64,
    delete: AtomicU64,
}

/// Snapshot of how often each store operation was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    /// `presign_put` calls.
    pub presign_put: u64,
    /// `presign_get` calls.
    pub presign_get: u64,
    /// `exists` calls.
    pub exists: u64,
    /// `delete` calls.
    pub delete: u64,
}

/// Object store that keeps the set of existing objects in memory.
#[derive(Debug)]
pub struct MemoryObjectStore {
    objects: RwLock<HashSet<(String, String)>>,
    endpoint_url: String,
    image_bucket: String,
    audio_bucket: String,
    presign_expiry: Duration,
    rewriter: ProxyRewriter,
    calls: CallCounters,
    sequence: AtomicU64,
}

impl MemoryObjectStore {
    /// Create an empty store using the buckets and expiry from configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            objects: RwLock::new(HashSet::new()),
            endpoint_url: config.s3.endpoint_url(),
            image_bucket: config.image_bucket.clone(),
            audio_bucket: config.audio_bucket.clone(),
            presign_expiry: config.presign_expiry(),
            rewriter: ProxyRewriter::from_config(&config.s3),
            calls: CallCounters::default(),
            sequence: AtomicU64::new(0),
        }
    }

    fn bucket(&self, file_type: FileType) -> &str {
        match file_type {
            FileType::Image => &self.image_bucket,
            FileType::Audio => &self.audio_bucket,
        }
    }

    fn object_key(&self, file_type: FileType, file_id: &FileId) -> (String, String) {
        (self.bucket(file_type).to_string(), file_id.as_str().to_string())
    }

    /// Simulate a client completing an upload through a put URL.
    pub async fn put_object(&self, file_type: FileType, file_id: &FileId) {
        let key = self.object_key(file_type, file_id);
        self.objects.write().await.insert(key);
    }

    /// Number of stored objects across both buckets.
    #[cfg(test)]
    async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// How often each operation has been called so far.
    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            presign_put: self.calls.presign_put.load(Ordering::Relaxed),
            presign_get: self.calls.presign_get.load(Ordering::Relaxed),
            exists: self.calls.exists.load(Ordering::Relaxed),
            delete: self.calls.delete.load(Ordering::Relaxed),
        }
    }

    fn mint(&self, op: &str, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let url = format!(
            "{}/{}/{}?X-Op={op}&X-Expires={}&X-Seq={seq}",
            self.endpoint_url,
            self.bucket(file_type),
            file_id,
            self.presign_expiry.as_secs(),
        );
        PresignedUrl::issue(self.rewriter.rewrite(&url), file_id.as_str(), self.presign_expiry)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    fn presign_expiry(&self) -> Duration {
        self.presign_expiry
    }

    async fn presign_put(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        self.calls.presign_put.fetch_add(1, Ordering::Relaxed);
        self.mint("put", file_type, file_id)
    }

    async fn presign_get(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        self.calls.presign_get.fetch_add(1, Ordering::Relaxed);
        self.mint("get", file_type, file_id)
    }

    async fn exists(&self, file_type: FileType, file_id: &FileId) -> AppResult<bool> {
        self.calls.exists.fetch_add(1, Ordering::Relaxed);
        let key = self.object_key(file_type, file_id);
        Ok(self.objects.read().await.contains(&key))
    }

    async fn delete(&self, file_type: FileType, file_id: &FileId) -> AppResult<()> {
        self.calls.delete.fetch_add(1, Ordering::Relaxed);
        let key = self.object_key(file_type, file_id);
        let removed = self.objects.write().await.remove(&key);
        debug!(bucket = %key.0, file_id = %key.1, removed, "Memory object deleted");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
