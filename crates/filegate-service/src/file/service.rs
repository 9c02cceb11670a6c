//! File coordination: presigned URL issuance, existence checks, deletion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_core::traits::cache::UrlCache;
use filegate_core::traits::metrics::MetricsSink;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::{FileId, FileType, PresignedUrl};

use crate::context::OperationContext;

/// Result of issuing an upload URL: the new object's id and where to PUT it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTicket {
    /// Presigned PUT URL.
    pub url: String,
    /// When the URL stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Freshly generated id the object will be stored under.
    pub file_id: FileId,
}

/// Coordinates the object store and the URL cache.
///
/// Store failures are the operation's result. Cache failures never are: a
/// failed read is a miss and a failed write or delete is logged and counted.
/// Cancellation is the exception and always propagates.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Object store that mints URLs and owns the objects.
    store: Arc<dyn ObjectStore>,
    /// URL cache; put and get URLs live under separate keys.
    cache: Arc<dyn UrlCache>,
    /// Counter sink.
    metrics: Arc<dyn MetricsSink>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        cache: Arc<dyn UrlCache>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            store,
            cache,
            metrics,
        }
    }

    /// Generate a new file id and mint an upload URL for it.
    ///
    /// The URL is cached under the object's upload key for one presign
    /// lifetime, never where downloads look. A failed presign aborts before
    /// the cache is touched.
    pub async fn issue_upload_url(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
    ) -> AppResult<UploadTicket> {
        let result = self.upload_url_inner(ctx, file_type).await;
        self.record("upload_url", &result);
        result
    }

    async fn upload_url_inner(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
    ) -> AppResult<UploadTicket> {
        let file_id = FileId::generate();
        let presigned = ctx.run(self.store.presign_put(file_type, &file_id)).await?;

        let key = self.cache.generate_upload_key(file_type, file_id.as_str());
        self.cache_set(ctx, &key, &presigned).await?;

        info!(
            file_type = %file_type,
            file_id = %file_id,
            expires_at = %presigned.expires_at,
            "Issued upload URL"
        );

        Ok(UploadTicket {
            url: presigned.url,
            expires_at: presigned.expires_at,
            file_id,
        })
    }

    /// Return a download URL for an existing object.
    ///
    /// A cached download URL is returned as-is; otherwise a new one is minted
    /// and cached. Upload entries are never consulted. A missing object is `NotFound` and never touches the cache.
    pub async fn issue_download_url(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
        file_id: &FileId,
    ) -> AppResult<PresignedUrl> {
        let result = self.download_url_inner(ctx, file_type, file_id).await;
        self.record("download_url", &result);
        result
    }

    async fn download_url_inner(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
        file_id: &FileId,
    ) -> AppResult<PresignedUrl> {
        self.require_exists(ctx, file_type, file_id).await?;

        let key = self.cache.generate_key(file_type, file_id.as_str());
        if let Some(cached) = self.cache_get(ctx, &key).await? {
            debug!(file_type = %file_type, file_id = %file_id, "Download URL served from cache");
            return Ok(cached);
        }

        let presigned = ctx.run(self.store.presign_get(file_type, file_id)).await?;
        self.cache_set(ctx, &key, &presigned).await?;

        info!(file_type = %file_type, file_id = %file_id, "Issued download URL");
        Ok(presigned)
    }

    /// Whether the object exists. The cache is not consulted.
    pub async fn check_exists(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
        file_id: &FileId,
    ) -> AppResult<bool> {
        let result = ctx.run(self.store.exists(file_type, file_id)).await;
        self.record("exists", &result);
        result
    }

    /// Delete an existing object and invalidate its cached URLs.
    ///
    /// Both the download and the upload entry are removed, and only after the
    /// store delete succeeded.
    pub async fn delete_file(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
        file_id: &FileId,
    ) -> AppResult<()> {
        let result = self.delete_inner(ctx, file_type, file_id).await;
        self.record("delete", &result);
        result
    }

    async fn delete_inner(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
        file_id: &FileId,
    ) -> AppResult<()> {
        self.require_exists(ctx, file_type, file_id).await?;
        ctx.run(self.store.delete(file_type, file_id)).await?;

        let keys = [
            self.cache.generate_key(file_type, file_id.as_str()),
            self.cache.generate_upload_key(file_type, file_id.as_str()),
        ];
        for key in &keys {
            self.cache_delete(ctx, key).await?;
        }

        info!(file_type = %file_type, file_id = %file_id, "File deleted");
        Ok(())
    }

    async fn require_exists(
        &self,
        ctx: &OperationContext,
        file_type: FileType,
        file_id: &FileId,
    ) -> AppResult<()> {
        if ctx.run(self.store.exists(file_type, file_id)).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "File not found: {file_type}/{file_id}"
            )))
        }
    }

    async fn cache_get(&self, ctx: &OperationContext, key: &str) -> AppResult<Option<PresignedUrl>> {
        match ctx.run(self.cache.get(key)).await {
            Ok(hit) => {
                self.metrics.record_cache_lookup(hit.is_some());
                Ok(hit)
            }
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                self.metrics.record_cache_failure("get");
                self.metrics.record_cache_lookup(false);
                Ok(None)
            }
        }
    }

    async fn cache_set(
        &self,
        ctx: &OperationContext,
        key: &str,
        value: &PresignedUrl,
    ) -> AppResult<()> {
        let ttl = self.store.presign_expiry();
        match ctx.run(self.cache.set(key, value, ttl)).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to cache presigned URL");
                self.metrics.record_cache_failure("set");
                Ok(())
            }
        }
    }

    async fn cache_delete(&self, ctx: &OperationContext, key: &str) -> AppResult<()> {
        match ctx.run(self.cache.delete(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                // The stale URL stays valid for at most one presign lifetime.
                warn!(key = %key, error = %e, "Failed to invalidate cached URL after delete");
                self.metrics.record_cache_failure("delete");
                Ok(())
            }
        }
    }

    fn record<T>(&self, operation: &'static str, result: &AppResult<T>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => match e.kind {
                ErrorKind::NotFound => "not_found",
                ErrorKind::Validation => "invalid",
                ErrorKind::Cancelled => "cancelled",
                _ => "error",
            },
        };
        self.metrics.record_operation(operation, outcome);
    }
}
