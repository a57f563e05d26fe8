//! Error types for the terminal front end.

use thiserror::Error;

/// Result type for terminal operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Errors raised while setting up or driving the terminal.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal I/O failed.
    #[error("terminal error")]
    Terminal(#[from] std::io::Error),

    /// The log file could not be opened.
    #[error("cannot open log file")]
    LogFile(#[from] tracing_appender::rolling::InitError),

    /// A global subscriber was already installed.
    #[error("cannot install logging")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
