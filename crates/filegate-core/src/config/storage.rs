//! Object store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::FileType;

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Object store provider: `"s3"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Validity of every presigned URL, in seconds. Also the cache TTL.
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_seconds: u64,
    /// Bucket holding image objects.
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    /// Bucket holding audio objects.
    #[serde(default = "default_audio_bucket")]
    pub audio_bucket: String,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl StorageConfig {
    /// The configured presign validity as a [`Duration`].
    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_seconds)
    }

    /// The bucket that stores objects of the given file type.
    pub fn bucket_for(&self, file_type: FileType) -> &str {
        match file_type {
            FileType::Image => &self.image_bucket,
            FileType::Audio => &self.audio_bucket,
        }
    }

    /// Every bucket the service writes to, in file-type order.
    pub fn buckets(&self) -> [&str; 2] {
        [&self.image_bucket, &self.audio_bucket]
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            presign_expiry_seconds: default_presign_expiry(),
            image_bucket: default_image_bucket(),
            audio_bucket: default_audio_bucket(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration (AWS, MinIO, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Store endpoint as `host:port`, without scheme.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Whether to talk to the endpoint over HTTPS.
    #[serde(default)]
    pub use_ssl: bool,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID.
    #[serde(default = "default_credential")]
    pub access_key: String,
    /// Secret access key.
    #[serde(default = "default_credential")]
    pub secret_key: String,
    /// Public path that replaces `endpoint` in returned URLs, for deployments
    /// behind a reverse proxy (e.g. `localhost/s3`).
    #[serde(default)]
    pub public_endpoint: Option<String>,
}

impl S3StorageConfig {
    /// Full endpoint URL including scheme.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{scheme}://{}", self.endpoint)
    }
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            use_ssl: false,
            region: default_region(),
            access_key: default_credential(),
            secret_key: default_credential(),
            public_endpoint: None,
        }
    }
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_presign_expiry() -> u64 {
    900 // 15 minutes
}

fn default_image_bucket() -> String {
    "image".to_string()
}

fn default_audio_bucket() -> String {
    "audio".to_string()
}

fn default_endpoint() -> String {
    "localhost:9000".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_credential() -> String {
    "minioadmin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_selection() {
        let config = StorageConfig {
            image_bucket: "pics".to_string(),
            audio_bucket: "sounds".to_string(),
            ..StorageConfig::default()
        };
        assert_eq!(config.bucket_for(FileType::Image), "pics");
        assert_eq!(config.bucket_for(FileType::Audio), "sounds");
        assert_eq!(config.buckets(), ["pics", "sounds"]);
    }

    #[test]
    fn test_endpoint_url_scheme() {
        let mut s3 = S3StorageConfig::default();
        assert_eq!(s3.endpoint_url(), "http://localhost:9000");
        s3.use_ssl = true;
        assert_eq!(s3.endpoint_url(), "https://localhost:9000");
    }
}
