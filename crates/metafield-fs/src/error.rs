//! Error types for the file backend.

use metafield_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for file operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur while reading, updating or writing a metadata file.
#[derive(Debug, Error)]
pub enum FsError {
    /// File extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported file format for '{0}': expected a .json, .yaml or .yml file")]
    UnsupportedFormat(PathBuf),

    /// Top-level document is not a mapping.
    #[error("metadata document must be a mapping, found {0}")]
    NotAMapping(&'static str),

    /// Entry holds a value that cannot be written back unchanged.
    #[error("unsupported value for '{field}': {reason}")]
    UnsupportedValue { field: String, reason: &'static str },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core library error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FsError {
    /// Whether the error comes from the invocation (field name or file type)
    /// rather than from the file contents.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_) | Self::Core(CoreError::UnsupportedField(_))
        )
    }

    /// Whether the error comes from malformed file contents.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::NotAMapping(_) | Self::UnsupportedValue { .. } | Self::Yaml(_) | Self::Json(_)
        )
    }
}
