//! Presigned URL, existence and delete handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use filegate_core::error::AppError;

use crate::dto::request::{FileQuery, UploadUrlRequest};
use crate::dto::response::{ExistsResponse, UploadUrlResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/upload-url
pub async fn issue_upload_url(
    State(state): State<AppState>,
    payload: Result<Json<UploadUrlRequest>, JsonRejection>,
) -> Result<Json<UploadUrlResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let file_type = req.file_type()?;

    let ctx = state.operation_context();
    let ticket = state.file_service.issue_upload_url(&ctx, file_type).await?;
    Ok(Json(ticket.into()))
}

/// GET /api/v1/download-url?type=&file_id=
///
/// Redirects (302) to the presigned download URL.
pub async fn issue_download_url(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Response, ApiError> {
    let (file_type, file_id) = query.parse()?;

    let ctx = state.operation_context();
    let presigned = state
        .file_service
        .issue_download_url(&ctx, file_type, &file_id)
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, presigned.url)]).into_response())
}

/// GET /api/v1/exists?type=&file_id=
pub async fn check_exists(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let (file_type, file_id) = query.parse()?;

    let ctx = state.operation_context();
    let exists = state
        .file_service
        .check_exists(&ctx, file_type, &file_id)
        .await?;
    Ok(Json(ExistsResponse { exists }))
}

/// DELETE /api/v1?type=&file_id=
pub async fn delete_file(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<StatusCode, ApiError> {
    let (file_type, file_id) = query.parse()?;

    let ctx = state.operation_context();
    state
        .file_service
        .delete_file(&ctx, file_type, &file_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
