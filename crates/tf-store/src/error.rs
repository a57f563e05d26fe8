//! Error types for document storage.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing documents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with this name already exists.
    #[error("document already exists: {0}")]
    Duplicate(String),

    /// No document with this name exists.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The name has no usable characters left after sanitizing.
    #[error("invalid document name: {0:?}")]
    InvalidName(String),

    /// Filesystem failure.
    #[error("i/o error at {}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A document could not be encoded or decoded.
    #[error("malformed document {name}")]
    Malformed {
        /// The document name.
        name: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
}
