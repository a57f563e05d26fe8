//! Terminal front end for Taleforge.
//!
//! Hosts the presentation pump on the UI thread: directives from the logic
//! thread are revealed in a ratatui transcript and key presses are turned
//! into lines and page acknowledgements.

/// Application state and input handling.
pub mod app;
/// Error types for the terminal front end.
pub mod error;
/// The presentation pump state machine.
pub mod pump;
/// Process setup: data directory and logging.
pub mod setup;
/// Terminal setup, teardown, and main event loop.
pub mod terminal;
/// Drawing.
pub mod view;

pub use app::App;
pub use error::{TuiError, TuiResult};
pub use pump::{Pump, PumpState};
