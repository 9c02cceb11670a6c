//! Presigned URL capability and the cache key that addresses it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file_type::FileType;
use crate::error::AppError;

/// A time-bounded capability to read or write one object.
///
/// Serialized as `{"url", "expires_at", "file_id"}`; this is also the record
/// format stored by the Redis cache backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// Instant after which the URL is no longer valid.
    pub expires_at: DateTime<Utc>,
    /// Object key the URL points at.
    pub file_id: String,
}

impl PresignedUrl {
    /// Wrap a freshly minted URL that stays valid for `valid_for` from now.
    pub fn issue(
        url: impl Into<String>,
        file_id: impl Into<String>,
        valid_for: std::time::Duration,
    ) -> Result<Self, AppError> {
        let valid_for = chrono::Duration::from_std(valid_for)
            .map_err(|e| AppError::configuration(format!("Presign expiry out of range: {e}")))?;
        Ok(Self {
            url: url.into(),
            expires_at: Utc::now() + valid_for,
            file_id: file_id.into(),
        })
    }

    /// Whether the URL is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the URL is past its expiry right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Build the cache key for an object's download URL: `"<file_type>:<file_id>"`.
///
/// Every cache backend addresses entries with this key; backends that share
/// a store with other data add their own namespace prefix on top.
pub fn cache_key(file_type: FileType, file_id: &str) -> String {
    format!("{}:{file_id}", file_type.as_str())
}

/// Build the cache key for an object's upload URL: `"upload:<file_type>:<file_id>"`.
///
/// Download keys always start with a file type, so the two namespaces never
/// overlap whatever the file id contains.
pub fn upload_cache_key(file_type: FileType, file_id: &str) -> String {
    format!("upload:{}", cache_key(file_type, file_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(FileType::Image, "abc"), "image:abc");
        assert_eq!(
            cache_key(FileType::Audio, "00000000-0000-0000-0000-000000000000"),
            "audio:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_upload_key_never_collides_with_download_key() {
        assert_eq!(upload_cache_key(FileType::Image, "abc"), "upload:image:abc");
        for id in ["abc", "abc:upload", "upload:image:abc"] {
            for file_type in [FileType::Image, FileType::Audio] {
                assert_ne!(
                    upload_cache_key(file_type, id),
                    cache_key(file_type, id),
                    "id {id:?}"
                );
            }
        }
        assert_ne!(
            upload_cache_key(FileType::Image, "abc"),
            cache_key(FileType::Image, "upload:image:abc")
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let url = PresignedUrl {
            url: "http://x".to_string(),
            expires_at: now,
            file_id: "f".to_string(),
        };
        assert!(url.is_expired_at(now));
        assert!(!url.is_expired_at(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_issue_sets_expiry_from_now() {
        let before = Utc::now();
        let url = PresignedUrl::issue("http://x", "f", std::time::Duration::from_secs(900)).unwrap();
        assert!(url.expires_at >= before + Duration::seconds(900));
        assert!(!url.is_expired());
        assert_eq!(url.file_id, "f");
    }

    #[test]
    fn test_json_field_names() {
        let url = PresignedUrl {
            url: "http://x".to_string(),
            expires_at: Utc::now(),
            file_id: "f".to_string(),
        };
        let value = serde_json::to_value(&url).unwrap();
        assert!(value.get("url").is_some());
        assert!(value.get("expires_at").is_some());
        assert_eq!(value["file_id"], "f");
    }
}
