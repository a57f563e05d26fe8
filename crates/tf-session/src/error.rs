//! Error types for the session layer.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that end or interrupt a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The presentation side went away.
    #[error(transparent)]
    Channel(#[from] tf_core::ChannelError),

    /// Storage failed.
    #[error("storage error")]
    Store(#[from] tf_store::StoreError),

    /// Adventure content could not be created or restored.
    #[error("adventure error")]
    World(#[from] tf_world::WorldError),

    /// The current signature has no mode behind it.
    #[error("no mode registered for \"{0}\"")]
    MissingMode(String),
}
