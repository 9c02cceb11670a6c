//! Presigned URL issuance and object lifecycle.

pub mod service;

pub use service::{FileService, UploadTicket};
