//! S3-compatible object store provider (AWS S3, MinIO).

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::{PresignedRequest, PresigningConfig};
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use tracing::{debug, info, warn};

use filegate_core::config::storage::StorageConfig;
use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::{FileId, FileType, PresignedUrl};

use crate::rewrite::ProxyRewriter;

/// Region that must not be sent as an explicit location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// S3-compatible object store.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    /// AWS SDK client (path-style addressing).
    client: Client,
    /// Bucket for image objects.
    image_bucket: String,
    /// Bucket for audio objects.
    audio_bucket: String,
    /// Region used when creating buckets.
    region: String,
    /// Validity of minted URLs.
    presign_expiry: Duration,
    /// Internal → public endpoint rewrite.
    rewriter: ProxyRewriter,
}

impl S3ObjectStore {
    /// Create a new S3 store from configuration using static credentials.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let s3 = &config.s3;
        info!(
            endpoint = %s3.endpoint,
            region = %s3.region,
            image_bucket = %config.image_bucket,
            audio_bucket = %config.audio_bucket,
            "Initializing S3 object store"
        );

        let credentials = Credentials::new(
            s3.access_key.clone(),
            s3.secret_key.clone(),
            None,
            None,
            "filegate-static",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(s3.region.clone()))
            .endpoint_url(s3.endpoint_url())
            .credentials_provider(credentials)
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(Self::from_client(Client::from_conf(s3_config), config))
    }

    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            image_bucket: config.image_bucket.clone(),
            audio_bucket: config.audio_bucket.clone(),
            region: config.s3.region.clone(),
            presign_expiry: config.presign_expiry(),
            rewriter: ProxyRewriter::from_config(&config.s3),
        }
    }

    /// The bucket that stores objects of the given file type.
    fn bucket(&self, file_type: FileType) -> &str {
        match file_type {
            FileType::Image => &self.image_bucket,
            FileType::Audio => &self.audio_bucket,
        }
    }

    fn presigning_config(&self) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(self.presign_expiry).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid presign expiry", e)
        })
    }

    /// Rewrite the signed request's URI and stamp the expiry.
    fn finish(&self, presigned: PresignedRequest, file_id: &FileId) -> AppResult<PresignedUrl> {
        let url = self.rewriter.rewrite(&presigned.uri().to_string());
        PresignedUrl::issue(url, file_id.as_str(), self.presign_expiry)
    }

    /// Create every configured bucket that does not exist yet and attach a
    /// public-read policy to it.
    ///
    /// A failure to attach the policy is logged and ignored; failing to check
    /// or create a bucket aborts.
    pub async fn provision_buckets(&self) -> AppResult<()> {
        for bucket in [&self.image_bucket, &self.audio_bucket] {
            match self.client.head_bucket().bucket(bucket.as_str()).send().await {
                Ok(_) => {
                    debug!(bucket = %bucket, "Bucket already exists");
                    continue;
                }
                Err(err) if is_missing_bucket(&err) => {}
                Err(err) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to check if bucket {bucket} exists"),
                        err,
                    ));
                }
            }

            let mut request = self.client.create_bucket().bucket(bucket.as_str());
            if self.region != DEFAULT_REGION {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                        .build(),
                );
            }
            request.send().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create bucket {bucket}"),
                    e,
                )
            })?;

            if let Err(e) = self
                .client
                .put_bucket_policy()
                .bucket(bucket.as_str())
                .policy(public_read_policy(bucket))
                .send()
                .await
            {
                warn!(bucket = %bucket, error = %e, "Failed to set bucket policy");
            }

            info!(bucket = %bucket, "Bucket created successfully");
        }
        Ok(())
    }
}

/// Bucket policy granting anonymous `s3:GetObject` on every object.
pub fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {"AWS": ["*"]},
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{bucket}/*")],
        }]
    })
    .to_string()
}

fn is_missing_bucket(err: &SdkError<HeadBucketError>) -> bool {
    err.as_service_error()
        .is_some_and(HeadBucketError::is_not_found)
        || err.raw_response().is_some_and(|r| r.status().as_u16() == 404)
}

// HEAD responses carry no body, so some servers surface a bare 404 that the
// SDK cannot classify as `NotFound`.
fn is_missing_object(err: &SdkError<HeadObjectError>) -> bool {
    err.as_service_error()
        .is_some_and(HeadObjectError::is_not_found)
        || err.raw_response().is_some_and(|r| r.status().as_u16() == 404)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    fn presign_expiry(&self) -> Duration {
        self.presign_expiry
    }

    async fn presign_put(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        let presigned = self
            .client
            .put_object()
            .bucket(self.bucket(file_type))
            .key(file_id.as_str())
            .presigned(self.presigning_config()?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to generate presigned put URL",
                    e,
                )
            })?;
        self.finish(presigned, file_id)
    }

    async fn presign_get(&self, file_type: FileType, file_id: &FileId) -> AppResult<PresignedUrl> {
        let presigned = self
            .client
            .get_object()
            .bucket(self.bucket(file_type))
            .key(file_id.as_str())
            .presigned(self.presigning_config()?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to generate presigned get URL",
                    e,
                )
            })?;
        self.finish(presigned, file_id)
    }

    async fn exists(&self, file_type: FileType, file_id: &FileId) -> AppResult<bool> {
        let result = self
            .client
            .head_object()
            .bucket(self.bucket(file_type))
            .key(file_id.as_str())
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) if is_missing_object(&err) => Ok(false),
            Err(err) => Err(AppError::with_source(
                ErrorKind::Storage,
                "Failed to check file existence",
                err,
            )),
        }
    }

    async fn delete(&self, file_type: FileType, file_id: &FileId) -> AppResult<()> {
        let bucket = self.bucket(file_type);
        self.client
            .delete_object()
            .bucket(bucket)
            .key(file_id.as_str())
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete file", e))?;

        info!(bucket, file_id = %file_id, "File deleted from object store");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(self.image_bucket.as_str())
            .send()
            .await
            .map(|_| true)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Object store health check failed", e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filegate_core::config::storage::S3StorageConfig;

    fn offline_store(public_endpoint: Option<&str>) -> S3ObjectStore {
        let config = StorageConfig {
            s3: S3StorageConfig {
                public_endpoint: public_endpoint.map(str::to_string),
                ..S3StorageConfig::default()
            },
            ..StorageConfig::default()
        };
        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.s3.region.clone()))
            .endpoint_url(config.s3.endpoint_url())
            .credentials_provider(Credentials::new("ak", "sk", None, None, "test"))
            .force_path_style(true)
            .build();
        S3ObjectStore::from_client(Client::from_conf(s3_config), &config)
    }

    #[test]
    fn test_public_read_policy() {
        let policy: serde_json::Value = serde_json::from_str(&public_read_policy("image")).unwrap();
        assert_eq!(policy["Statement"][0]["Action"][0], "s3:GetObject");
        assert_eq!(
            policy["Statement"][0]["Resource"][0],
            "arn:aws:s3:::image/*"
        );
        assert_eq!(policy["Statement"][0]["Principal"]["AWS"][0], "*");
    }

    #[tokio::test]
    async fn test_presign_put_selects_bucket_by_type() {
        let store = offline_store(None);
        let id = FileId::generate();

        let image = store.presign_put(FileType::Image, &id).await.unwrap();
        assert!(image.url.starts_with(&format!("http://localhost:9000/image/{id}?")));
        assert_eq!(image.file_id, id.as_str());
        assert!(!image.is_expired());

        let audio = store.presign_get(FileType::Audio, &id).await.unwrap();
        assert!(audio.url.starts_with(&format!("http://localhost:9000/audio/{id}?")));
    }

    #[tokio::test]
    async fn test_presigned_urls_are_rewritten() {
        let store = offline_store(Some("localhost/s3"));
        let id = FileId::generate();

        let put = store.presign_put(FileType::Image, &id).await.unwrap();
        let get = store.presign_get(FileType::Image, &id).await.unwrap();
        for url in [put.url, get.url] {
            assert!(url.starts_with(&format!("http://localhost/s3/image/{id}?")), "{url}");
            assert!(url.contains("X-Amz-Signature="));
        }
    }
}
