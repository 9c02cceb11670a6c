//! The object identifier used as key inside a bucket.
//!
//! Fresh identifiers are random UUIDs minted at upload-URL issuance.
//! Identifiers arriving from callers are treated as opaque strings and only
//! checked for shape, so that a bad value is rejected before any store or
//! cache call is made.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Longest accepted identifier, in bytes.
pub const MAX_FILE_ID_LEN: usize = 255;

/// Identifier of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Mint a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validate a caller-supplied identifier.
    ///
    /// The value is used verbatim as the object key, so surrounding
    /// whitespace is rejected rather than stripped.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() {
            return Err(AppError::validation("file_id is required"));
        }
        if raw.trim() != raw {
            return Err(AppError::validation(
                "file_id must not start or end with whitespace",
            ));
        }
        if raw.len() > MAX_FILE_ID_LEN {
            return Err(AppError::validation(format!(
                "file_id exceeds {MAX_FILE_ID_LEN} bytes"
            )));
        }
        if raw.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
            return Err(AppError::validation("file_id contains invalid characters"));
        }
        Ok(Self(raw.to_string()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FileId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_generate_is_uuid() {
        let id = FileId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_parse_accepts_opaque_ids() {
        assert_eq!(FileId::parse("missing-id").unwrap().as_str(), "missing-id");
        assert_eq!(FileId::parse("my file.png").unwrap().as_str(), "my file.png");
    }

    #[test]
    fn test_parse_keeps_key_verbatim() {
        for raw in [" abc ", "abc ", " abc", "\tabc", "abc\u{a0}"] {
            let err = FileId::parse(raw).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "input {raw:?}");
        }
        assert_eq!("abc".parse::<FileId>().unwrap().as_str(), "abc");
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        for raw in ["", "   ", "a/b", "a\\b", "a\nb"] {
            let err = FileId::parse(raw).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "input {raw:?}");
        }
        let long = "x".repeat(MAX_FILE_ID_LEN + 1);
        assert!(FileId::parse(&long).is_err());
    }
}
