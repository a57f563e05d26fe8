//! The navigation controller.
//!
//! A [`Navigator`] owns every mode of the session, remembers the current and
//! previous signature, and turns each player line into presentation
//! directives. It runs on the logic thread and blocks on player input.

use std::collections::HashMap;
use std::sync::Arc;

use strsim::jaro_winkler;
use tf_core::{
    FaultReporter, LogicEnd, Mode, ModeChange, Outcome, PlayerCommand, SessionCommand,
    is_affirmative,
};
use tf_store::StoreError;
use tf_world::{Adventure, START_SIGNATURE, SaveDocument, WorldError};

use crate::error::{SessionError, SessionResult};
use crate::menus::{
    EMPTY_LOAD_PROMPT, LOAD_MENU, LOAD_PROMPT, MAIN_MENU, SETTINGS_MENU, is_main_menu_family,
    menu_modes,
};
use crate::state::SessionState;

/// Shown at startup when the welcome message is enabled.
pub const WELCOME: &str = "Welcome to Taleforge!\n\
    Type commands like \"look\" or \"push cow\" and press Enter.\n\
    Type \"help\" whenever you are lost.";

const INVALID_INPUT: &str = "Please use only letters and spaces.";
const CANT_GO_BACK: &str = "You can't go back from here.";
const HANDLER_FAILED: &str = "That didn't work. The problem has been noted.";
const QUIT_QUESTION: &str =
    "Are you sure you want to quit? Unsaved progress will be lost. (yes/no)";

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Why a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The player confirmed quitting from the main-menu family.
    Quit,
    /// The presentation side went away.
    Disconnected,
    /// Data was wiped; the session must be rebuilt.
    Reset,
}

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Wait for the next line.
    Continue,
    /// Stop the loop.
    Exit(Exit),
}

/// Owns the modes and drives transitions between them.
pub struct Navigator {
    modes: HashMap<String, Mode<SessionState>>,
    current: String,
    last: Option<String>,
    state: SessionState,
    channel: LogicEnd,
    faults: Arc<dyn FaultReporter>,
}

impl Navigator {
    /// Create a navigator positioned at the main menu.
    pub fn new(state: SessionState, channel: LogicEnd, faults: Arc<dyn FaultReporter>) -> Self {
        Self {
            modes: menu_modes(),
            current: MAIN_MENU.to_string(),
            last: None,
            state,
            channel,
            faults,
        }
    }

    /// Signature of the active mode.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Signature of the previous mode, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// The session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a mode is registered under `signature`.
    pub fn has_mode(&self, signature: &str) -> bool {
        self.modes.contains_key(signature)
    }

    /// Give back the state and the channel.
    pub fn into_parts(self) -> (SessionState, LogicEnd) {
        (self.state, self.channel)
    }

    /// Show the opening page and process lines until the session ends.
    pub fn run(&mut self) -> SessionResult<Exit> {
        match self.session_loop() {
            Err(SessionError::Channel(_)) => {
                tracing::info!("presentation closed, ending session");
                Ok(Exit::Disconnected)
            }
            other => other,
        }
    }

    fn session_loop(&mut self) -> SessionResult<Exit> {
        self.start()?;
        loop {
            let line = self.channel.read_line()?;
            if let Flow::Exit(exit) = self.handle_line(&line)? {
                return Ok(exit);
            }
        }
    }

    /// Show the title, the welcome message (if enabled) and the prompt.
    pub fn start(&mut self) -> SessionResult<()> {
        self.channel.set_title(self.title())?;
        if self.state.config.show_welcome {
            self.say(WELCOME)?;
        }
        self.show_prompt()
    }

    /// Process one raw line from the player.
    pub fn handle_line(&mut self, raw: &str) -> SessionResult<Flow> {
        let Some(mode) = self.modes.get(&self.current) else {
            return self.recover_missing_mode();
        };
        let command = match PlayerCommand::parse(raw, |verb| mode.is_command(verb)) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                tracing::debug!(error = %err, "rejected input");
                self.say(INVALID_INPUT)?;
                return Ok(Flow::Continue);
            }
        };
        if !mode.is_command(&command.verb) {
            let reply = unknown_verb(mode, &command.verb);
            self.say(reply)?;
            return Ok(Flow::Continue);
        }

        let Some(mode) = self.modes.get_mut(&self.current) else {
            return self.recover_missing_mode();
        };
        let outcome = mode.run_command(
            &mut self.state,
            &command.verb,
            &command.nouns,
            self.faults.as_ref(),
        );
        match outcome {
            Some(outcome) => self.apply(outcome),
            None => {
                self.say(HANDLER_FAILED)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn recover_missing_mode(&mut self) -> SessionResult<Flow> {
        let err = SessionError::MissingMode(self.current.clone());
        self.faults.report(&err, "navigation");
        self.current = MAIN_MENU.to_string();
        self.last = None;
        self.present_current()?;
        Ok(Flow::Continue)
    }

    /// Act on a command outcome.
    pub fn apply(&mut self, outcome: Outcome) -> SessionResult<Flow> {
        match outcome {
            Outcome::Text(text) => self.say(text)?,
            Outcome::Enumeration { heading, entries } => {
                let mut text = heading;
                for entry in entries {
                    text.push_str("\n  ");
                    text.push_str(&entry);
                }
                self.say(text)?;
            }
            Outcome::Resolution(pairs) => {
                let lines: Vec<String> = pairs
                    .into_iter()
                    .map(|(key, text)| match text {
                        Some(text) => format!("{key}: {text}"),
                        None => format!("There is nothing like \"{key}\" here."),
                    })
                    .collect();
                self.say(lines.join("\n"))?;
            }
            Outcome::ModeChange(ModeChange::Back) => return self.back(),
            Outcome::ModeChange(ModeChange::Quit) => return self.quit(),
            Outcome::ModeChange(ModeChange::To(signature)) => return self.change_mode(&signature),
            Outcome::Session(command) => return self.session_command(command),
        }
        Ok(Flow::Continue)
    }

    /// Transition to the mode registered under `signature`.
    ///
    /// Unknown signatures leave everything unchanged.
    pub fn change_mode(&mut self, signature: &str) -> SessionResult<Flow> {
        if !self.modes.contains_key(signature) {
            self.say(format!("There is nowhere called \"{signature}\" to go."))?;
            return Ok(Flow::Continue);
        }
        let previous = std::mem::replace(&mut self.current, signature.to_string());
        tracing::debug!(from = %previous, to = %signature, "mode transition");
        self.last = if signature == START_SIGNATURE {
            None
        } else {
            Some(previous)
        };
        self.present_current()?;
        Ok(Flow::Continue)
    }

    fn back(&mut self) -> SessionResult<Flow> {
        let target = match &self.last {
            Some(last) if self.current != MAIN_MENU && self.modes.contains_key(last) => {
                last.clone()
            }
            _ => {
                self.say(CANT_GO_BACK)?;
                return Ok(Flow::Continue);
            }
        };
        let previous = std::mem::replace(&mut self.current, target);
        tracing::debug!(from = %previous, to = %self.current, "back");
        self.last = Some(previous);
        self.present_current()?;
        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> SessionResult<Flow> {
        let in_menus = is_main_menu_family(&self.current);
        let from_menus = self.last.as_deref().is_some_and(is_main_menu_family);

        if !in_menus && !from_menus && !self.confirm(QUIT_QUESTION)? {
            self.show_prompt()?;
            return Ok(Flow::Continue);
        }
        if in_menus {
            tracing::info!("player quit");
            return Ok(Flow::Exit(Exit::Quit));
        }
        if self.current == START_SIGNATURE || self.last.as_deref() == Some(START_SIGNATURE) {
            self.leave_adventure();
        }
        self.change_mode(MAIN_MENU)
    }

    fn session_command(&mut self, command: SessionCommand) -> SessionResult<Flow> {
        tracing::debug!(%command, "session command");
        match command {
            SessionCommand::Save => self.save(),
            SessionCommand::Settings => self.change_mode(SETTINGS_MENU),
            SessionCommand::NewGame => self.new_game(),
            SessionCommand::Continue => match self.state.config.last_save.clone() {
                Some(name) => self.load_save(&name),
                None => {
                    self.say("There is no adventure to continue yet. Start a \"new\" one.")?;
                    Ok(Flow::Continue)
                }
            },
            SessionCommand::Load(name) => self.load_save(&name),
            SessionCommand::Delete(name) => self.delete_save(&name),
            SessionCommand::Wipe => self.wipe(),
        }
    }

    fn save(&mut self) -> SessionResult<Flow> {
        let Some(adventure) = &self.state.adventure else {
            self.say("There is no adventure to save.")?;
            return Ok(Flow::Continue);
        };
        let name = adventure.player().to_string();
        let summary = adventure.summary();

        if let Err(err) = self.state.data.store_save(&name, &adventure.to_save()) {
            self.faults.report(&err, "save");
            self.say("Your progress could not be saved.")?;
            return Ok(Flow::Continue);
        }
        tracing::info!(save = %name, "adventure saved");
        self.state.config.record_save(name, summary);
        self.persist_config()?;
        self.say("Your progress has been saved.")?;
        self.show_prompt()?;
        Ok(Flow::Continue)
    }

    fn new_game(&mut self) -> SessionResult<Flow> {
        let adventure = loop {
            self.say("What is your name, adventurer? (or \"cancel\")")?;
            let answer = self.channel.read_line()?;
            if matches!(tf_core::sanitize(&answer), Ok(Some(word)) if word == "cancel") {
                self.show_prompt()?;
                return Ok(Flow::Continue);
            }
            let adventure = match Adventure::new(&answer) {
                Ok(adventure) => adventure,
                Err(WorldError::ReservedPlayerName(name)) => {
                    self.say(format!("\"{name}\" is a reserved word. Pick another name."))?;
                    continue;
                }
                Err(_) => {
                    self.say("Names can only use letters and spaces.")?;
                    continue;
                }
            };
            let name = adventure.player();
            if self.state.config.saves.contains_key(name) {
                self.say(format!(
                    "There is already a save called \"{name}\". Pick another name."
                ))?;
                continue;
            }
            match self.state.data.create_save(name, &adventure.to_save()) {
                Ok(()) => break adventure,
                Err(StoreError::Duplicate(_)) => {
                    self.say(format!(
                        "There is already a save called \"{name}\". Pick another name."
                    ))?;
                }
                Err(err) => {
                    self.faults.report(&err, "new game");
                    self.say("A new save could not be created.")?;
                    self.show_prompt()?;
                    return Ok(Flow::Continue);
                }
            }
        };

        tracing::info!(player = %adventure.player(), "new adventure");
        self.state
            .config
            .record_save(adventure.player(), adventure.summary());
        self.persist_config()?;
        self.start_adventure(adventure)
    }

    fn load_save(&mut self, name: &str) -> SessionResult<Flow> {
        let restored = match self.state.data.read_save::<SaveDocument>(name) {
            Ok(Some(doc)) => Adventure::from_save(doc).map_err(SessionError::from),
            Ok(None) => {
                self.say(format!("The save \"{name}\" has gone missing."))?;
                self.state.config.forget_save(name);
                self.persist_config()?;
                self.refresh_saves();
                return Ok(Flow::Continue);
            }
            Err(err) => Err(SessionError::from(err)),
        };
        let adventure = match restored {
            Ok(adventure) => adventure,
            Err(err) => {
                self.faults.report(&err, "load");
                self.say(format!("The save \"{name}\" can't be loaded."))?;
                return Ok(Flow::Continue);
            }
        };

        tracing::info!(save = %name, "adventure loaded");
        self.state.config.last_save = Some(name.to_string());
        self.persist_config()?;
        self.start_adventure(adventure)
    }

    fn delete_save(&mut self, name: &str) -> SessionResult<Flow> {
        if !self.confirm(&format!("Delete \"{name}\" for good? (yes/no)"))? {
            self.say("Nothing was deleted.")?;
            return Ok(Flow::Continue);
        }
        match self.state.data.delete_save(name) {
            Ok(()) | Err(StoreError::NotFound(_)) => {
                tracing::info!(save = %name, "save deleted");
                self.state.config.forget_save(name);
                self.persist_config()?;
                self.refresh_saves();
                self.say(format!("\"{name}\" is gone."))?;
            }
            Err(err) => {
                self.faults.report(&err, "delete");
                self.say(format!("\"{name}\" could not be deleted."))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn wipe(&mut self) -> SessionResult<Flow> {
        let question = "This deletes every save and resets all settings. Are you sure? (yes/no)";
        if !self.confirm(question)? {
            self.show_prompt()?;
            return Ok(Flow::Continue);
        }
        if let Err(err) = self.state.data.wipe() {
            self.faults.report(&err, "wipe");
            self.say("Your data could not be wiped.")?;
            return Ok(Flow::Continue);
        }
        tracing::info!("data wiped");
        self.say("Everything has been wiped. Starting over.")?;
        self.channel.clear()?;
        self.channel.await_page_ack()?;
        Ok(Flow::Exit(Exit::Reset))
    }

    fn start_adventure(&mut self, adventure: Adventure) -> SessionResult<Flow> {
        self.modes.extend(tf_world::modes::<SessionState>());
        self.state.adventure = Some(adventure);
        self.change_mode(START_SIGNATURE)
    }

    fn leave_adventure(&mut self) {
        for (signature, _) in tf_world::modes::<SessionState>() {
            self.modes.remove(&signature);
        }
        self.state.adventure = None;
    }

    fn refresh_saves(&mut self) {
        let Some(mode) = self.modes.get_mut(LOAD_MENU) else {
            return;
        };
        mode.clear_objects();
        for (name, summary) in &self.state.config.saves {
            mode.add_object(name, summary, Some("Type \"load\" and its name to resume it."));
        }
        mode.set_prompt(if mode.objects().is_empty() {
            EMPTY_LOAD_PROMPT
        } else {
            LOAD_PROMPT
        });
    }

    fn persist_config(&self) -> SessionResult<()> {
        if let Err(err) = self.state.persist_config() {
            tracing::warn!(error = %err, "configuration not saved");
            self.faults.report(&err, "configuration");
            self.say("Your settings could not be saved.")?;
        }
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> SessionResult<bool> {
        self.say(question)?;
        let answer = self.channel.read_line()?;
        Ok(is_affirmative(&answer))
    }

    fn present_current(&mut self) -> SessionResult<()> {
        if self.current == LOAD_MENU {
            self.refresh_saves();
        }
        self.channel.clear()?;
        self.channel.set_title(self.title())?;
        self.channel.await_page_ack()?;
        self.show_prompt()
    }

    fn title(&self) -> String {
        if let (true, Some(adventure)) = (self.current == START_SIGNATURE, &self.state.adventure) {
            return adventure.location_title().to_string();
        }
        self.modes
            .get(&self.current)
            .map(|mode| mode.title().to_string())
            .unwrap_or_default()
    }

    fn show_prompt(&mut self) -> SessionResult<()> {
        let prompt = self
            .modes
            .get(&self.current)
            .map(|mode| mode.prompt().to_string())
            .unwrap_or_default();
        self.say(prompt)
    }

    fn say(&self, text: impl Into<String>) -> SessionResult<()> {
        let delay = self.state.config.text_speed.char_delay();
        self.channel
            .render(text, delay)
            .map_err(SessionError::from)
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .field("last", &self.last)
            .field("modes", &self.modes.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn unknown_verb(mode: &Mode<SessionState>, verb: &str) -> String {
    let suggestion = mode
        .verbs()
        .map(|known| (known, jaro_winkler(verb, known)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1));
    match suggestion {
        Some((known, _)) => format!("I don't know how to \"{verb}\". Did you mean \"{known}\"?"),
        None => format!("I don't know how to \"{verb}\". Type \"help\" to see what you can do."),
    }
}
