//! Menu modes: the main menu, the load screen and the two settings screens.

use std::collections::HashMap;

use tf_core::{HandlerError, HandlerResult, Mode, Objects, Outcome, SessionCommand};
use tf_store::{MAX_VOLUME, TextSpeed};

use crate::state::SessionState;

/// Root signature.
pub const MAIN_MENU: &str = "main";
/// Save browser reached from the main menu.
pub const LOAD_MENU: &str = "load";
/// Settings reached from the main menu.
pub const OPTIONS_MENU: &str = "options";
/// Settings reached from gameplay.
pub const SETTINGS_MENU: &str = "settings";

pub(crate) const LOAD_PROMPT: &str =
    "Your saves are listed here. Type \"look\" to see them, then \"load\" or \"delete\" one.";
pub(crate) const EMPTY_LOAD_PROMPT: &str =
    "You don't have any saves yet. Go \"back\" and start something \"new\".";

const NUMBER_WORDS: [&str; 11] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// Whether `signature` belongs to the main-menu family.
pub fn is_main_menu_family(signature: &str) -> bool {
    matches!(signature, MAIN_MENU | LOAD_MENU | OPTIONS_MENU)
}

/// Build every menu mode, keyed by signature.
pub fn menu_modes() -> HashMap<String, Mode<SessionState>> {
    HashMap::from([
        (MAIN_MENU.to_string(), main_menu()),
        (LOAD_MENU.to_string(), load_menu()),
        (OPTIONS_MENU.to_string(), settings_menu("Options", true)),
        (SETTINGS_MENU.to_string(), settings_menu("Settings", false)),
    ])
}

fn main_menu() -> Mode<SessionState> {
    let mut mode = Mode::new(
        "Main Menu",
        "You stand at the main menu. Type \"help\" to see what you can do here.",
    );
    mode.add_command("new", Some("Start a new adventure."), |_, _, _| {
        Ok(Outcome::Session(SessionCommand::NewGame))
    });
    mode.add_command(
        "continue",
        Some("Pick up your most recent adventure."),
        |_, _, _| Ok(Outcome::Session(SessionCommand::Continue)),
    );
    mode.add_command("load", Some("Browse your saved adventures."), |_, _, _| {
        Ok(Outcome::go_to(LOAD_MENU))
    });
    mode.add_command("options", Some("Change music, sound and text speed."), |_, _, _| {
        Ok(Outcome::go_to(OPTIONS_MENU))
    });
    mode
}

fn load_menu() -> Mode<SessionState> {
    let mut mode = Mode::new("Load Game", EMPTY_LOAD_PROMPT);
    mode.add_command("load", Some("Load a save by name."), |_, objects, nouns| {
        Ok(match pick_save(objects, nouns, "load") {
            Ok(name) => Outcome::Session(SessionCommand::Load(name)),
            Err(reply) => reply,
        })
    });
    mode.add_command("delete", Some("Delete a save by name."), |_, objects, nouns| {
        Ok(match pick_save(objects, nouns, "delete") {
            Ok(name) => Outcome::Session(SessionCommand::Delete(name)),
            Err(reply) => reply,
        })
    });
    mode.add_alias("remove", "delete");
    mode
}

/// Resolve the save named by `nouns`; multi-word names are joined with spaces.
fn pick_save(objects: &Objects, nouns: &[String], verb: &str) -> Result<String, Outcome> {
    if nouns.is_empty() {
        return Err(Outcome::text(format!(
            "Which save do you want to {verb}? Type \"look\" to see them."
        )));
    }
    let name = nouns.join(" ");
    if name == tf_core::ALL_OBJECTS || !objects.contains(&name) {
        return Err(Outcome::text(format!("There is no save called \"{name}\".")));
    }
    Ok(name)
}

fn settings_menu(title: &str, allow_wipe: bool) -> Mode<SessionState> {
    let mut mode = Mode::new(
        title,
        "Adjust your settings. Type \"show\" to see them, or \"help\" for the commands.",
    );
    mode.add_command(
        "music",
        Some("Set the music volume: a number from zero to ten, or up, down, mute, max."),
        |state: &mut SessionState, _, nouns| {
            let Some(volume) = parse_volume(nouns, state.config.music_volume) else {
                return Ok(volume_usage("music"));
            };
            state.config = state.config.clone().with_music_volume(volume);
            persist(state, format!("Music volume set to {}.", state.config.music_volume))
        },
    );
    mode.add_command(
        "effects",
        Some("Set the effects volume: a number from zero to ten, or up, down, mute, max."),
        |state: &mut SessionState, _, nouns| {
            let Some(volume) = parse_volume(nouns, state.config.effects_volume) else {
                return Ok(volume_usage("effects"));
            };
            state.config = state.config.clone().with_effects_volume(volume);
            persist(
                state,
                format!("Effects volume set to {}.", state.config.effects_volume),
            )
        },
    );
    mode.add_command(
        "speed",
        Some("Set the text speed: instant, quick, normal or slow."),
        |state: &mut SessionState, _, nouns| {
            let speed = match nouns {
                [word] => word.parse::<TextSpeed>().ok(),
                _ => None,
            };
            let Some(speed) = speed else {
                let tiers: Vec<&str> = TextSpeed::ALL.iter().map(|s| s.name()).collect();
                return Ok(Outcome::text(format!(
                    "Text speed can be one of: {}.",
                    tiers.join(", ")
                )));
            };
            state.config = state.config.clone().with_text_speed(speed);
            persist(state, format!("Text speed set to {speed}."))
        },
    );
    mode.add_command(
        "welcome",
        Some("Turn the welcome message on or off."),
        |state: &mut SessionState, _, nouns| {
            let show = match nouns {
                [word] if word == "on" || word == "yes" => true,
                [word] if word == "off" || word == "no" => false,
                _ => return Ok(Outcome::text("Say \"welcome on\" or \"welcome off\".")),
            };
            state.config = state.config.clone().with_welcome(show);
            let state_word = if show { "on" } else { "off" };
            persist(state, format!("Welcome message turned {state_word}."))
        },
    );
    mode.add_command(
        "show",
        Some("Show the current settings."),
        |state: &mut SessionState, _, _| Ok(Outcome::text(state.config.describe())),
    );
    if allow_wipe {
        mode.add_command(
            "wipe",
            Some("Delete every save and reset all settings."),
            |_, _, _| Ok(Outcome::Session(SessionCommand::Wipe)),
        );
    }
    mode
}

fn persist(state: &SessionState, confirmation: String) -> HandlerResult {
    state.persist_config().map_err(HandlerError::other)?;
    tracing::debug!(config = ?state.config, "configuration updated");
    Ok(Outcome::Text(confirmation))
}

fn volume_usage(channel: &str) -> Outcome {
    Outcome::text(format!(
        "Say \"{channel}\" followed by a number from zero to ten, or up, down, mute or max."
    ))
}

fn parse_volume(nouns: &[String], current: u8) -> Option<u8> {
    let [word] = nouns else {
        return None;
    };
    match word.as_str() {
        "up" | "louder" => Some(current.saturating_add(1).min(MAX_VOLUME)),
        "down" | "quieter" => Some(current.saturating_sub(1)),
        "mute" | "off" => Some(0),
        "max" => Some(MAX_VOLUME),
        other => NUMBER_WORDS
            .iter()
            .position(|n| *n == other)
            .and_then(|n| u8::try_from(n).ok()),
    }
}
