//! Request DTOs.

use serde::{Deserialize, Serialize};

use filegate_core::error::AppError;
use filegate_core::types::{FileId, FileType};

/// Body of `POST /api/v1/upload-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// `"image"` or `"audio"`.
    pub file_type: String,
}

impl UploadUrlRequest {
    /// Parse the requested file type.
    pub fn file_type(&self) -> Result<FileType, AppError> {
        self.file_type.parse()
    }
}

/// Query string addressing one object: `?type=image&file_id=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileQuery {
    /// `"image"` or `"audio"`.
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    /// Object key.
    pub file_id: Option<String>,
}

impl FileQuery {
    /// Validate both parameters before any store or cache call.
    pub fn parse(&self) -> Result<(FileType, FileId), AppError> {
        let file_type = self
            .file_type
            .as_deref()
            .ok_or_else(|| AppError::validation("type query parameter is required"))?
            .parse::<FileType>()?;
        let file_id = self
            .file_id
            .as_deref()
            .ok_or_else(|| AppError::validation("file_id query parameter is required"))?;
        Ok((file_type, FileId::parse(file_id)?))
    }
}
