//! Persistence for Taleforge.
//!
//! A small JSON document store, the data directory layout built on it, and the
//! session configuration record kept there.

/// Session configuration.
pub mod config;
/// Data directory layout.
pub mod data;
/// Error types for storage.
pub mod error;
/// JSON document store.
pub mod store;

pub use config::{MAX_VOLUME, SessionConfig, TextSpeed};
pub use data::{CONFIG_DOCUMENT, DataDir, SAVES_DIR};
pub use error::{StoreError, StoreResult};
pub use store::{DocumentStore, NAME_FILLER, sanitize_name};
