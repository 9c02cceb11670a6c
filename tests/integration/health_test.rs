//! Integration tests for health endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"status": "healthy", "service": "filegate"}));
}

#[tokio::test]
async fn test_health_is_open_with_api_key() {
    let app = TestApp::with_api_key("secret");

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_detailed_reports_backends_and_metrics() {
    let app = TestApp::new();
    app.request("POST", "/api/v1/upload-url", Some(json!({"file_type": "audio"})), None)
        .await;

    let response = app.request("GET", "/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["cache"]["provider"], "memory");
    assert_eq!(response.body["storage"]["provider"], "memory");
    assert_eq!(response.body["metrics"]["operations"]["upload_url.ok"], 1);
}
