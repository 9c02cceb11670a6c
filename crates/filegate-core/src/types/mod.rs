//! Core type definitions used across the FileGate workspace.

pub mod file_type;
pub mod id;
pub mod presigned;

pub use file_type::FileType;
pub use id::FileId;
pub use presigned::{PresignedUrl, cache_key, upload_cache_key};
