//! Results of running a command against a mode.

use std::fmt;

/// What a command asks the navigation controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Plain text to display.
    Text(String),
    /// A list of keys, e.g. every verb for `help` or every object for `look`.
    Enumeration {
        /// Line shown above the list.
        heading: String,
        /// The enumerated keys.
        entries: Vec<String>,
    },
    /// Per-target lookup in request order; `None` marks an unresolved target.
    Resolution(Vec<(String, Option<String>)>),
    /// Navigate to another mode.
    ModeChange(ModeChange),
    /// A request handled by the session rather than the navigation table.
    Session(SessionCommand),
}

impl Outcome {
    /// Shorthand for [`Outcome::Text`].
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Shorthand for a transition to a named mode.
    pub fn go_to(signature: impl Into<String>) -> Self {
        Self::ModeChange(ModeChange::To(signature.into()))
    }
}

/// Navigation instruction carried by [`Outcome::ModeChange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    /// Undo the last transition.
    Back,
    /// Leave the current screen (to the main menu, or out of the program).
    Quit,
    /// Enter the mode registered under this signature.
    To(String),
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Back => write!(f, "back"),
            Self::Quit => write!(f, "quit"),
            Self::To(signature) => write!(f, "{signature}"),
        }
    }
}

/// Session-level commands issued by menus and adventure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Persist the running adventure.
    Save,
    /// Open the in-game settings screen.
    Settings,
    /// Ask for a player name and start a fresh adventure.
    NewGame,
    /// Resume the most recently saved adventure.
    Continue,
    /// Resume the named save.
    Load(String),
    /// Delete the named save.
    Delete(String),
    /// Delete every save and the configuration, then restart the session.
    Wipe,
}

impl fmt::Display for SessionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save => write!(f, "save"),
            Self::Settings => write!(f, "settings"),
            Self::NewGame => write!(f, "new game"),
            Self::Continue => write!(f, "continue"),
            Self::Load(name) => write!(f, "load {name}"),
            Self::Delete(name) => write!(f, "delete {name}"),
            Self::Wipe => write!(f, "wipe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_to_builds_mode_change() {
        assert_eq!(
            Outcome::go_to("load"),
            Outcome::ModeChange(ModeChange::To("load".to_string()))
        );
    }

    #[test]
    fn mode_change_display() {
        assert_eq!(ModeChange::Back.to_string(), "back");
        assert_eq!(ModeChange::Quit.to_string(), "quit");
        assert_eq!(ModeChange::To("options".into()).to_string(), "options");
    }
}
