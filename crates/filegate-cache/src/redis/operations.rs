//! Redis URL cache implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use tracing::debug;

use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_core::traits::cache::UrlCache;
use filegate_core::types::PresignedUrl;

use super::client::RedisClient;

/// Redis-backed URL cache.
///
/// Entries are JSON records under `<prefix><file_type>:<file_id>` and expire
/// natively in Redis. Reads re-check the embedded `expires_at` so a clock
/// skew between this host and Redis never yields a stale URL.
#[derive(Debug, Clone)]
pub struct RedisUrlCache {
    /// Redis client.
    client: RedisClient,
}

impl RedisUrlCache {
    /// Create a new Redis URL cache.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

/// Decode a stored record, treating a record past its embedded expiry as absent.
pub(crate) fn decode_record(raw: &str, now: DateTime<Utc>) -> AppResult<Option<PresignedUrl>> {
    let value: PresignedUrl = serde_json::from_str(raw)?;
    if value.is_expired_at(now) {
        return Ok(None);
    }
    Ok(Some(value))
}

/// Redis rejects `PX 0`; anything below a millisecond is rounded up.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl UrlCache for RedisUrlCache {
    fn backend(&self) -> &str {
        "redis"
    }

    async fn get(&self, key: &str) -> AppResult<Option<PresignedUrl>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;

        match raw {
            Some(raw) => {
                let value = decode_record(&raw, Utc::now())?;
                if value.is_none() {
                    debug!(key = %full_key, "Discarded cache record past its embedded expiry");
                }
                Ok(value)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &PresignedUrl, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let payload = serde_json::to_string(value)?;
        let mut conn = self.client.conn_mut();

        // SET key value PX ttl
        let _: () = redis::cmd("SET")
            .arg(&full_key)
            .arg(payload)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filegate_core::config::cache::RedisCacheConfig;
    use filegate_core::types::FileType;

    fn make_url(expires_at: DateTime<Utc>) -> PresignedUrl {
        PresignedUrl {
            url: "http://localhost/s3/audio/f1?X-Amz-Signature=abc".to_string(),
            expires_at,
            file_id: "f1".to_string(),
        }
    }

    #[test]
    fn test_decode_live_record() {
        let now = Utc::now();
        let url = make_url(now + chrono::Duration::minutes(15));
        let raw = serde_json::to_string(&url).unwrap();

        assert_eq!(decode_record(&raw, now).unwrap(), Some(url));
    }

    #[test]
    fn test_decode_rejects_record_past_embedded_expiry() {
        let now = Utc::now();
        let url = make_url(now - chrono::Duration::milliseconds(4));
        let raw = serde_json::to_string(&url).unwrap();

        assert_eq!(decode_record(&raw, now).unwrap(), None);
    }

    #[test]
    fn test_decode_reads_flat_record() {
        let raw = r#"{"url":"http://x/image/id","expires_at":"2999-01-01T00:00:00Z","file_id":"id"}"#;
        let value = decode_record(raw, Utc::now()).unwrap().unwrap();
        assert_eq!(value.url, "http://x/image/id");
        assert_eq!(value.file_id, "id");
    }

    #[test]
    fn test_decode_garbage_is_serialization_error() {
        let err = decode_record("not json", Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_ttl_millis_never_zero() {
        assert_eq!(ttl_millis(Duration::ZERO), 1);
        assert_eq!(ttl_millis(Duration::from_micros(10)), 1);
        assert_eq!(ttl_millis(Duration::from_secs(900)), 900_000);
    }

    /// Requires a live Redis at `FILEGATE_TEST_REDIS_URL`.
    #[tokio::test]
    #[ignore]
    async fn test_live_roundtrip_and_expiry() {
        let url = std::env::var("FILEGATE_TEST_REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379/15".to_string());
        let config = RedisCacheConfig {
            url,
            key_prefix: "filegate-test:".to_string(),
        };
        let cache = RedisUrlCache::new(RedisClient::connect(&config).await.unwrap());
        let key = cache.generate_key(FileType::Audio, "live-f1");

        let value = make_url(Utc::now() + chrono::Duration::minutes(15));
        cache
            .set(&key, &value, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(value.clone()));

        cache.delete(&key).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), None);

        cache
            .set(&key, &value, Duration::from_millis(1))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }
}
