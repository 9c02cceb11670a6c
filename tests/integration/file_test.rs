//! Integration tests for file operations.

use axum::http::StatusCode;
use serde_json::json;

use filegate_core::traits::cache::UrlCache;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::{FileId, FileType};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_url_for_image() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/upload-url", Some(json!({"file_type": "image"})), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let file_id = response.body["file_id"].as_str().unwrap().to_string();
    let url = response.body["url"].as_str().unwrap();
    assert!(url.contains(&format!("/image/{file_id}?")));
    assert!(response.body["expires_at"].is_string());

    let exists = app
        .request(
            "GET",
            &format!("/api/v1/exists?type=image&file_id={file_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(exists.status, StatusCode::OK);
    assert_eq!(exists.body["exists"], false);

    let key = app.cache.generate_upload_key(FileType::Image, &file_id);
    assert!(app.cache.get(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_download_after_upload_redirects_to_get_url() {
    let app = TestApp::new();

    let upload = app
        .request("POST", "/api/v1/upload-url", Some(json!({"file_type": "image"})), None)
        .await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();
    let put_url = upload.body["url"].as_str().unwrap().to_string();
    app.upload(FileType::Image, &file_id).await;

    let download = app
        .request(
            "GET",
            &format!("/api/v1/download-url?type=image&file_id={file_id}"),
            None,
            None,
        )
        .await;

    assert_eq!(download.status, StatusCode::FOUND);
    let location = download.location().unwrap();
    assert_ne!(location, put_url);
    assert!(location.contains("X-Op=get"), "got {location}");
    assert_eq!(app.store.calls().presign_get, 1);
}

#[tokio::test]
async fn test_upload_url_rejects_unknown_type() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/upload-url", Some(json!({"file_type": "video"})), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.body["message"], "invalid file type");
    assert!(app.cache.is_empty().await);
}

#[tokio::test]
async fn test_upload_url_rejects_malformed_body() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/v1/upload-url", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_download_redirects_to_cached_url() {
    let app = TestApp::new();
    app.upload(FileType::Audio, "track-1").await;

    let first = app
        .request("GET", "/api/v1/download-url?type=audio&file_id=track-1", None, None)
        .await;
    let second = app
        .request("GET", "/api/v1/download-url?type=audio&file_id=track-1", None, None)
        .await;

    assert_eq!(first.status, StatusCode::FOUND);
    let location = first.location().unwrap();
    assert!(location.contains("/audio/track-1?"));
    assert_eq!(second.location(), Some(location));
    assert_eq!(app.store.calls().presign_get, 1);
}

#[tokio::test]
async fn test_download_missing_file_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/v1/download-url?type=image&file_id=nope", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert!(app.cache.is_empty().await);
}

#[tokio::test]
async fn test_download_requires_query_params() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/v1/download-url?type=image", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.calls().exists, 0);
}

#[tokio::test]
async fn test_padded_file_id_is_rejected() {
    let app = TestApp::new();
    app.upload(FileType::Image, "abc").await;

    let response = app
        .request("GET", "/api/v1/exists?type=image&file_id=%20abc%20", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(app.store.calls().exists, 0);
}

#[tokio::test]
async fn test_delete_then_download_is_not_found() {
    let app = TestApp::new();
    app.upload(FileType::Image, "photo-1").await;
    app.request("GET", "/api/v1/download-url?type=image&file_id=photo-1", None, None)
        .await;
    assert_eq!(app.cache.len().await, 1);
    // Upload URL cached for the same object, as issuance would have left it.
    let id = FileId::parse("photo-1").unwrap();
    let upload = app.store.presign_put(FileType::Image, &id).await.unwrap();
    let upload_key = app.cache.generate_upload_key(FileType::Image, id.as_str());
    app.cache
        .set(&upload_key, &upload, app.store.presign_expiry())
        .await
        .unwrap();
    assert_eq!(app.cache.len().await, 2);

    let deleted = app
        .request("DELETE", "/api/v1?type=image&file_id=photo-1", None, None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(app.cache.is_empty().await);

    let response = app
        .request("GET", "/api/v1/download-url?type=image&file_id=photo-1", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_file() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/api/v1?type=audio&file_id=missing-id", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.calls().delete, 0);
}

#[tokio::test]
async fn test_api_key_enforced() {
    let app = TestApp::with_api_key("secret");

    let missing = app
        .request("GET", "/api/v1/exists?type=image&file_id=a", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let wrong = app
        .request("GET", "/api/v1/exists?type=image&file_id=a", None, Some("nope"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let ok = app
        .request("GET", "/api/v1/exists?type=image&file_id=a", None, Some("secret"))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(app.store.calls().exists, 1);
}
