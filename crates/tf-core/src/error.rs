//! Error types for the engine core.

use thiserror::Error;

/// Result type returned by custom command handlers.
pub type HandlerResult = Result<crate::Outcome, HandlerError>;

/// Faults raised inside a custom command handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler needed state that is not available right now.
    #[error("missing state: {0}")]
    MissingState(String),

    /// The handler failed for a domain reason.
    #[error("{0}")]
    Failed(String),

    /// Any other error bubbled up from a collaborator.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap an arbitrary collaborator error.
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(err))
    }
}

/// Errors produced by the presentation channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The other end of the channel has been dropped.
    #[error("presentation channel disconnected")]
    Disconnected,
}

/// Errors produced while sanitizing player input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The line contained something other than letters and spaces.
    #[error("unsupported character {0:?}")]
    InvalidCharacter(char),
}
