//! Error types for metafield-core.

use thiserror::Error;

/// Result type alias for metafield-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in metafield-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Field name is not part of the canonical field list.
    #[error("unsupported field '{0}': not part of the accepted metadata fields")]
    UnsupportedField(String),
}
