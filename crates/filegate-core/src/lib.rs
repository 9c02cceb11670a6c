//! # filegate-core
//!
//! Core crate for FileGate. Contains configuration schemas, the domain
//! types shared by every layer (file types, file identifiers, presigned
//! URLs), the cache / object-store / metrics traits, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other FileGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
