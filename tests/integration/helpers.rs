//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use filegate_api::{AppState, build_router};
use filegate_cache::UrlCacheManager;
use filegate_cache::memory::MemoryUrlCache;
use filegate_core::config::AppConfig;
use filegate_core::types::{FileId, FileType};
use filegate_storage::StorageManager;
use filegate_storage::providers::MemoryObjectStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory object store behind the router
    pub store: Arc<MemoryObjectStore>,
    /// In-memory URL cache behind the router
    pub cache: Arc<MemoryUrlCache>,
}

impl TestApp {
    /// Create a test application without an API key
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application that requires `key` on `/api/v1`
    pub fn with_api_key(key: &str) -> Self {
        let mut config = AppConfig::default();
        config.security.api_key = key.to_string();
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryObjectStore::new(&config.storage));
        let cache = Arc::new(MemoryUrlCache::new());

        let state = AppState::new(
            config,
            Arc::new(UrlCacheManager::from_provider(cache.clone())),
            Arc::new(StorageManager::from_provider(store.clone())),
            CancellationToken::new(),
        );

        Self {
            router: build_router(state),
            store,
            cache,
        }
    }

    /// Mark an object as uploaded
    pub async fn upload(&self, file_type: FileType, file_id: &str) {
        let id = FileId::parse(file_id).expect("valid file id");
        self.store.put_object(file_type, &id).await;
    }

    /// Make a request against the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        api_key: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(key) = api_key {
            req = req.header("X-API-Key", key);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header, if any
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}
