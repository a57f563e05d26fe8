//! Session layer for Taleforge.
//!
//! Owns the session state, builds the menu modes and runs the navigation
//! controller that turns player lines into presentation directives.

/// Session driver: runs navigators until the player leaves.
pub mod driver;
/// Error types for the session layer.
pub mod error;
/// Menu modes.
pub mod menus;
/// The navigation controller.
pub mod navigator;
/// State lent to command handlers.
pub mod state;

pub use driver::run_session;
pub use error::{SessionError, SessionResult};
pub use menus::{LOAD_MENU, MAIN_MENU, OPTIONS_MENU, SETTINGS_MENU, is_main_menu_family};
pub use navigator::{Exit, Flow, Navigator};
pub use state::SessionState;
