//! Object store trait for presigned-URL capable backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{FileId, FileType, PresignedUrl};

/// Trait for object stores that can mint presigned URLs.
///
/// Implementations exist for S3-compatible stores and for an in-process
/// store used in development and tests. The bucket is always chosen from
/// the file type; the file id is the object key.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., `"s3"`, `"memory"`).
    fn provider_type(&self) -> &str;

    /// How long every minted URL stays valid.
    fn presign_expiry(&self) -> Duration;

    /// Mint a URL that allows a client to upload the object.
    async fn presign_put(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl>;

    /// Mint a URL that allows a client to download the object.
    async fn presign_get(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl>;

    /// Check whether the object exists. "Not found" is `Ok(false)`; any other
    /// failure is an error.
    async fn exists(&self, file_type: FileType, file_id: &FileId) -> AppResult<bool>;

    /// Delete the object. Whether deleting a missing object fails depends on
    /// the store; callers that need idempotence check [`exists`](Self::exists) first.
    async fn delete(&self, file_type: FileType, file_id: &FileId) -> AppResult<()>;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
