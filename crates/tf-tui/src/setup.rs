//! Process setup: where data lives and where logs go.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::TuiResult;

/// Environment variable overriding the data directory.
pub const DATA_ENV: &str = "TALEFORGE_DATA";
/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TALEFORGE_LOG";
/// Data directory used when [`DATA_ENV`] is unset.
pub const DEFAULT_DATA_DIR: &str = "./data";
/// Log file name inside the data directory.
pub const LOG_FILE: &str = "taleforge.log";

/// Resolve the data directory from the value of [`DATA_ENV`].
pub fn data_root(env_value: Option<OsString>) -> PathBuf {
    env_value
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Send `tracing` events as JSON lines to [`LOG_FILE`] in `dir`.
///
/// Writes are synchronous so fatal faults are on disk before the process
/// exits. Nothing is written to the terminal.
pub fn init_logging(dir: &Path) -> TuiResult<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_thread_names(true),
        )
        .try_init()?;
    Ok(())
}
