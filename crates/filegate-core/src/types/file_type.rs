//! Kinds of file the service issues URLs for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// File category; selects the target bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Image files.
    Image,
    /// Audio files.
    Audio,
}

impl FileType {
    /// All supported file types.
    pub const ALL: [FileType; 2] = [FileType::Image, FileType::Audio];

    /// Lowercase name, as used in cache keys and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "audio" => Ok(Self::Audio),
            _ => Err(AppError::validation("invalid file type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!("image".parse::<FileType>().unwrap(), FileType::Image);
        assert_eq!("audio".parse::<FileType>().unwrap(), FileType::Audio);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Image".parse::<FileType>().is_err());
        assert!("video".parse::<FileType>().is_err());
        assert!("".parse::<FileType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FileType::Audio).unwrap();
        assert_eq!(json, "\"audio\"");
        let parsed: FileType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(parsed, FileType::Image);
    }
}
