//! Error types for adventure content.

use thiserror::Error;

/// Result type for adventure operations.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors raised while creating or restoring an adventure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The player name is empty or not made of letters and spaces.
    #[error("invalid player name: {0:?}")]
    InvalidPlayerName(String),

    /// The player name collides with a reserved word such as `all`.
    #[error("reserved player name: {0:?}")]
    ReservedPlayerName(String),

    /// The save was written by an incompatible version.
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedSave {
        /// Version found in the document.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },
}
