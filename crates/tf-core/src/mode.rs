//! Command and object registry scoped to a single screen.
//!
//! A [`Mode`] knows which verbs the player may use on a screen and which
//! objects those verbs may target. Every mode carries the built-in `help`,
//! `look`, `back` and `quit` commands; custom commands are closures over a
//! caller-supplied context `C`.

use std::collections::BTreeMap;

use crate::error::HandlerResult;
use crate::fault::FaultReporter;
use crate::outcome::{ModeChange, Outcome};

/// Reserved object key meaning "everything in this mode".
pub const ALL_OBJECTS: &str = "all";

/// Text shown when a mode has no concrete objects.
pub const NOTHING_HERE: &str = "There is nothing here.";

/// A custom command handler.
///
/// Receives the session context, the mode's object catalog and the nouns the
/// player typed after the verb.
pub type Handler<C> = Box<dyn FnMut(&mut C, &Objects, &[String]) -> HandlerResult + Send>;

/// Description of a single object the player can refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// What `look` shows.
    pub description: String,
    /// What `help` shows.
    pub hint: Option<String>,
}

/// The object catalog of a mode.
///
/// Always contains the reserved [`ALL_OBJECTS`] entry; the iteration helpers
/// only yield concrete objects. Keys are compared after [`normalize_key`].
#[derive(Debug, Clone)]
pub struct Objects {
    entries: BTreeMap<String, ObjectRef>,
}

impl Objects {
    fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(ALL_OBJECTS.to_string(), reserved_object());
        Self { entries }
    }

    /// Look up an object, including the reserved key.
    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.entries.get(&normalize_key(key))
    }

    /// Whether `key` names an object, including the reserved key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Iterate concrete objects in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectRef)> {
        self.entries
            .iter()
            .filter(|(key, _)| key.as_str() != ALL_OBJECTS)
            .map(|(key, object)| (key.as_str(), object))
    }

    /// Iterate concrete object keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Number of concrete objects.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    /// Whether only the reserved key is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn reserved_object() -> ObjectRef {
    ObjectRef {
        description: "Everything around you.".to_string(),
        hint: Some(format!("Use \"{ALL_OBJECTS}\" to mean everything here.")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Help,
    Look,
    Back,
    Quit,
}

enum Action<C> {
    Builtin(Builtin),
    Custom(Handler<C>),
}

struct Command<C> {
    action: Action<C>,
    hint: Option<String>,
    aliases: Vec<String>,
}

/// A screen's command and object catalog plus the text shown on entry.
pub struct Mode<C> {
    title: String,
    prompt: String,
    commands: BTreeMap<String, Command<C>>,
    objects: Objects,
}

impl<C> Mode<C> {
    /// Create a mode holding only the built-in commands.
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        let mut mode = Self {
            title: title.into(),
            prompt: prompt.into(),
            commands: BTreeMap::new(),
            objects: Objects::new(),
        };
        mode.insert_builtin("help", Builtin::Help, "Get a hint about anything.", &["hint"]);
        mode.insert_builtin(
            "look",
            Builtin::Look,
            "See more details about your surroundings.",
            &["list"],
        );
        mode.insert_builtin("back", Builtin::Back, "Go back to the previous screen.", &["return"]);
        mode.insert_builtin(
            "quit",
            Builtin::Quit,
            "Leave to the main menu, or exit from the main menu.",
            &[],
        );
        mode
    }

    fn insert_builtin(&mut self, verb: &str, builtin: Builtin, hint: &str, aliases: &[&str]) {
        self.commands.insert(
            verb.to_string(),
            Command {
                action: Action::Builtin(builtin),
                hint: Some(hint.to_string()),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            },
        );
    }

    /// Page title shown while this mode is active.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text shown when the mode is entered.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the entry prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// The object catalog.
    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    /// Primary verbs in alphabetical order.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Register a custom command.
    ///
    /// Registering an existing verb replaces its handler and hint. Built-in
    /// verbs keep their behavior and only take the new hint.
    pub fn add_command<F>(&mut self, verb: &str, hint: Option<&str>, handler: F)
    where
        F: FnMut(&mut C, &Objects, &[String]) -> HandlerResult + Send + 'static,
    {
        let verb = normalize_verb(verb);
        let hint = hint.map(str::to_string);

        if let Some(existing) = self.commands.get_mut(&verb) {
            existing.hint = hint;
            if let Action::Custom(_) = existing.action {
                existing.action = Action::Custom(Box::new(handler));
            } else {
                tracing::debug!(verb = %verb, "built-in command keeps its behavior");
            }
            return;
        }

        self.commands.insert(
            verb,
            Command {
                action: Action::Custom(Box::new(handler)),
                hint,
                aliases: Vec::new(),
            },
        );
    }

    /// Make `alias` an alternative spelling of an existing verb.
    ///
    /// Returns `false` when `verb` is not registered or `alias` is already taken.
    pub fn add_alias(&mut self, alias: &str, verb: &str) -> bool {
        let alias = normalize_verb(alias);
        if self.is_command(&alias) {
            return false;
        }
        match self.commands.get_mut(&normalize_verb(verb)) {
            Some(command) => {
                command.aliases.push(alias);
                true
            }
            None => false,
        }
    }

    /// Add an object or overwrite the one stored under the same key.
    ///
    /// Returns `false`, leaving the catalog untouched, when `key` is the
    /// reserved [`ALL_OBJECTS`] key.
    pub fn add_object(&mut self, key: &str, description: &str, hint: Option<&str>) -> bool {
        let key = normalize_key(key);
        if key == ALL_OBJECTS {
            tracing::debug!(key = %key, "refusing to overwrite the reserved object");
            return false;
        }
        self.objects.entries.insert(
            key,
            ObjectRef {
                description: description.to_string(),
                hint: hint.map(str::to_string),
            },
        );
        true
    }

    /// Remove an object. The reserved key cannot be removed.
    pub fn delete_object(&mut self, key: &str) -> bool {
        let key = normalize_key(key);
        if key == ALL_OBJECTS {
            return false;
        }
        self.objects.entries.remove(&key).is_some()
    }

    /// Remove every concrete object.
    pub fn clear_objects(&mut self) {
        self.objects.entries.retain(|key, _| key == ALL_OBJECTS);
    }

    /// Whether `verb` (or an alias) is registered.
    pub fn is_command(&self, verb: &str) -> bool {
        self.primary_verb(verb).is_some()
    }

    /// Whether `key` names an object, including the reserved key.
    pub fn is_valid(&self, key: &str) -> bool {
        self.objects.contains(key)
    }

    fn primary_verb(&self, verb: &str) -> Option<&str> {
        let verb = normalize_verb(verb);
        if let Some((primary, _)) = self.commands.get_key_value(&verb) {
            return Some(primary.as_str());
        }
        self.commands
            .iter()
            .find(|(_, command)| command.aliases.contains(&verb))
            .map(|(primary, _)| primary.as_str())
    }

    fn command_hint(&self, verb: &str) -> Option<String> {
        let primary = self.primary_verb(verb)?;
        let hint = self
            .commands
            .get(primary)
            .and_then(|command| command.hint.clone())
            .unwrap_or_else(|| format!("\"{primary}\" does what it says."));
        Some(hint)
    }

    /// Run `verb` against `nouns`.
    ///
    /// Returns `None` when the verb is not registered, or when a custom handler
    /// failed; failures are passed to `faults`.
    pub fn run_command(
        &mut self,
        ctx: &mut C,
        verb: &str,
        nouns: &[String],
        faults: &dyn FaultReporter,
    ) -> Option<Outcome> {
        let primary = self.primary_verb(verb)?.to_string();

        let builtin = match self.commands.get(&primary)?.action {
            Action::Builtin(builtin) => Some(builtin),
            Action::Custom(_) => None,
        };
        if let Some(builtin) = builtin {
            return Some(self.run_builtin(builtin, nouns));
        }

        let command = self.commands.get_mut(&primary)?;
        let Action::Custom(handler) = &mut command.action else {
            return None;
        };
        match handler(ctx, &self.objects, nouns) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                faults.report(&err, &format!("command \"{primary}\" in {}", self.title));
                None
            }
        }
    }

    fn run_builtin(&self, builtin: Builtin, nouns: &[String]) -> Outcome {
        match builtin {
            Builtin::Help => self.help(nouns),
            Builtin::Look => self.look(nouns),
            Builtin::Back => Outcome::ModeChange(ModeChange::Back),
            Builtin::Quit => Outcome::ModeChange(ModeChange::Quit),
        }
    }

    fn help(&self, targets: &[String]) -> Outcome {
        if targets.is_empty() {
            return Outcome::Enumeration {
                heading: "You can use these commands:".to_string(),
                entries: self.verbs().map(str::to_string).collect(),
            };
        }

        let resolved = targets
            .iter()
            .map(|target| {
                let text = self
                    .objects
                    .get(target)
                    .map(|object| {
                        object
                            .hint
                            .clone()
                            .unwrap_or_else(|| object.description.clone())
                    })
                    .or_else(|| self.command_hint(target));
                (target.clone(), text)
            })
            .collect();
        Outcome::Resolution(resolved)
    }

    fn look(&self, targets: &[String]) -> Outcome {
        let everything = targets.len() == 1 && targets[0] == ALL_OBJECTS;

        if targets.is_empty() || everything {
            if self.objects.is_empty() {
                return Outcome::text(NOTHING_HERE);
            }
            if targets.is_empty() {
                return Outcome::Enumeration {
                    heading: "You see:".to_string(),
                    entries: self.objects.keys().map(str::to_string).collect(),
                };
            }
            return Outcome::Resolution(
                self.objects
                    .iter()
                    .map(|(key, object)| (key.to_string(), Some(object.description.clone())))
                    .collect(),
            );
        }

        Outcome::Resolution(
            targets
                .iter()
                .map(|target| {
                    let text = self.objects.get(target).map(|o| o.description.clone());
                    (target.clone(), text)
                })
                .collect(),
        )
    }
}

impl<C> std::fmt::Debug for Mode<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mode")
            .field("title", &self.title)
            .field("verbs", &self.commands.keys().collect::<Vec<_>>())
            .field("objects", &self.objects)
            .finish()
    }
}

/// Lowercase a verb and collapse inner whitespace.
pub fn normalize_verb(verb: &str) -> String {
    verb.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Object keys follow the same rules as verbs.
pub fn normalize_key(key: &str) -> String {
    normalize_verb(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::fault::MemoryReporter;
    use proptest::prelude::*;

    fn nouns(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn menu() -> Mode<()> {
        let mut mode = Mode::new("Main Menu", "Welcome!");
        for verb in ["new", "load", "options"] {
            mode.add_command(verb, Some("a menu entry"), |_, _, _| Ok(Outcome::text("ok")));
        }
        mode
    }

    fn run(mode: &mut Mode<()>, verb: &str, targets: &[&str]) -> Option<Outcome> {
        mode.run_command(&mut (), verb, &nouns(targets), &MemoryReporter::new())
    }

    #[test]
    fn builtins_always_present() {
        let mode: Mode<()> = Mode::new("t", "p");
        for verb in ["help", "look", "back", "quit"] {
            assert!(mode.is_command(verb), "{verb} missing");
        }
        assert!(mode.is_command("hint"));
        assert!(mode.is_command("RETURN"));
        assert!(mode.is_valid(ALL_OBJECTS));
    }

    #[test]
    fn help_lists_primary_verbs() {
        let mut mode = menu();
        let Some(Outcome::Enumeration { entries, .. }) = run(&mut mode, "help", &[]) else {
            panic!("expected enumeration");
        };
        assert_eq!(
            entries,
            vec!["back", "help", "load", "look", "new", "options", "quit"]
        );
    }

    #[test]
    fn help_resolves_objects_and_commands() {
        let mut mode = menu();
        mode.add_object("cow", "It's a cow.", Some("Push it."));
        mode.add_object("box", "A box.", None);

        let outcome = run(&mut mode, "help", &["cow", "new", "box", "monkey"]);
        assert_eq!(
            outcome,
            Some(Outcome::Resolution(vec![
                ("cow".into(), Some("Push it.".into())),
                ("new".into(), Some("a menu entry".into())),
                ("box".into(), Some("A box.".into())),
                ("monkey".into(), None),
            ]))
        );
    }

    #[test]
    fn look_without_objects() {
        let mut mode = menu();
        assert_eq!(run(&mut mode, "look", &[]), Some(Outcome::text(NOTHING_HERE)));
        assert_eq!(run(&mut mode, "look", &["all"]), Some(Outcome::text(NOTHING_HERE)));
    }

    #[test]
    fn look_all_expands_objects() {
        let mut mode = menu();
        mode.add_object("cow", "It's a cow.", None);
        mode.add_object("troll", "Enemy spotted!", None);

        assert_eq!(
            run(&mut mode, "look", &["all"]),
            Some(Outcome::Resolution(vec![
                ("cow".into(), Some("It's a cow.".into())),
                ("troll".into(), Some("Enemy spotted!".into())),
            ]))
        );
        let Some(Outcome::Enumeration { entries, .. }) = run(&mut mode, "list", &[]) else {
            panic!("expected enumeration");
        };
        assert_eq!(entries, vec!["cow", "troll"]);
    }

    #[test]
    fn look_unknown_target_is_null() {
        let mut mode = menu();
        assert_eq!(
            run(&mut mode, "look", &["monkey"]),
            Some(Outcome::Resolution(vec![("monkey".into(), None)]))
        );
    }

    #[test]
    fn back_and_quit_are_mode_changes() {
        let mut mode = menu();
        assert_eq!(
            run(&mut mode, "back", &[]),
            Some(Outcome::ModeChange(ModeChange::Back))
        );
        assert_eq!(
            run(&mut mode, "quit", &["now"]),
            Some(Outcome::ModeChange(ModeChange::Quit))
        );
    }

    #[test]
    fn unregistered_verb_is_not_found() {
        let mut mode = menu();
        assert_eq!(run(&mut mode, "dance", &["cow"]), None);
    }

    #[test]
    fn failing_handler_is_reported() {
        let mut mode: Mode<()> = Mode::new("World", "p");
        mode.add_command("explode", None, |_, _, _| {
            Err(HandlerError::Failed("kaboom".into()))
        });

        let faults = MemoryReporter::new();
        assert_eq!(mode.run_command(&mut (), "explode", &[], &faults), None);

        let records = faults.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "kaboom");
        assert!(records[0].origin.contains("explode"));
    }

    #[test]
    fn handlers_see_context_and_objects() {
        let mut mode: Mode<u32> = Mode::new("World", "p");
        mode.add_object("cow", "A cow.", None);
        mode.add_command("push", None, |pushes, objects, targets| {
            if targets.iter().all(|t| objects.contains(t)) {
                *pushes += 1;
            }
            Ok(Outcome::text(format!("pushed {pushes} times")))
        });

        let mut pushes = 0;
        let faults = MemoryReporter::new();
        mode.run_command(&mut pushes, "push", &nouns(&["cow"]), &faults);
        let outcome = mode.run_command(&mut pushes, "push", &nouns(&["cow"]), &faults);
        assert_eq!(outcome, Some(Outcome::text("pushed 2 times")));
        mode.run_command(&mut pushes, "push", &nouns(&["moon"]), &faults);
        assert_eq!(pushes, 2);
    }

    #[test]
    fn later_registration_overwrites() {
        let mut mode = menu();
        mode.add_command("new", Some("fresh"), |_, _, _| Ok(Outcome::text("second")));
        assert_eq!(run(&mut mode, "new", &[]), Some(Outcome::text("second")));
        assert_eq!(
            run(&mut mode, "help", &["new"]),
            Some(Outcome::Resolution(vec![("new".into(), Some("fresh".into()))]))
        );
    }

    #[test]
    fn builtins_cannot_be_replaced() {
        let mut mode = menu();
        mode.add_command("quit", Some("bye"), |_, _, _| Ok(Outcome::text("hijacked")));
        assert_eq!(
            run(&mut mode, "quit", &[]),
            Some(Outcome::ModeChange(ModeChange::Quit))
        );
        assert_eq!(
            run(&mut mode, "help", &["quit"]),
            Some(Outcome::Resolution(vec![("quit".into(), Some("bye".into()))]))
        );
    }

    #[test]
    fn reserved_object_survives_delete_and_clear() {
        let mut mode = menu();
        mode.add_object("cow", "A cow.", None);
        assert!(!mode.delete_object(ALL_OBJECTS));
        mode.clear_objects();
        assert!(mode.objects().is_empty());
        assert!(mode.is_valid(ALL_OBJECTS));
        assert!(!mode.is_valid("cow"));
    }

    #[test]
    fn object_keys_ignore_case() {
        let mut mode = menu();
        assert!(mode.add_object("Cow", "A cow.", None));
        assert!(mode.is_valid("Cow"));
        assert!(mode.is_valid("cow"));
        assert_eq!(mode.objects().keys().collect::<Vec<_>>(), vec!["cow"]);

        assert!(mode.delete_object("COW"));
        assert!(!mode.is_valid("cow"));
        assert!(mode.objects().is_empty());
    }

    #[test]
    fn reserved_object_cannot_be_overwritten() {
        let mut mode = menu();
        assert!(!mode.add_object("All", "A save called all.", None));
        assert!(mode.objects().is_empty());
        assert_eq!(
            mode.objects().get(ALL_OBJECTS).map(|o| o.description.as_str()),
            Some("Everything around you.")
        );
        assert_eq!(run(&mut mode, "look", &[]), Some(Outcome::text(NOTHING_HERE)));
    }

    #[test]
    fn delete_object_reports_presence() {
        let mut mode = menu();
        mode.add_object("bob", "Bob's save.", None);
        assert!(mode.delete_object("bob"));
        assert!(!mode.delete_object("bob"));
    }

    #[test]
    fn aliases_resolve_to_primary() {
        let mut mode = menu();
        assert!(mode.add_alias("begin", "new"));
        assert!(!mode.add_alias("begin", "load"));
        assert!(!mode.add_alias("fly", "soar"));
        assert_eq!(run(&mut mode, "begin", &[]), Some(Outcome::text("ok")));
    }

    #[test]
    fn multi_word_verbs_are_normalized() {
        let mut mode: Mode<()> = Mode::new("t", "p");
        mode.add_command("End  Scene", None, |_, _, _| Ok(Outcome::text("done")));
        assert!(mode.is_command("end scene"));
        assert_eq!(normalize_verb("  Go   Home "), "go home");
    }

    proptest! {
        #[test]
        fn help_enumerates_every_registered_verb(
            verbs in proptest::collection::btree_set("[a-z]{1,8}", 0..12)
        ) {
            let mut mode: Mode<()> = Mode::new("t", "p");
            for verb in &verbs {
                mode.add_command(verb, None, |_, _, _| Ok(Outcome::text("")));
            }
            let mut expected: std::collections::BTreeSet<String> = verbs.clone();
            for builtin in ["help", "look", "back", "quit"] {
                expected.insert(builtin.to_string());
            }

            let outcome = mode.run_command(&mut (), "help", &[], &MemoryReporter::new());
            let Some(Outcome::Enumeration { entries, .. }) = outcome else {
                panic!("expected enumeration");
            };
            let listed: std::collections::BTreeSet<String> = entries.into_iter().collect();
            prop_assert_eq!(listed, expected);
        }

        #[test]
        fn look_all_returns_every_object(
            keys in proptest::collection::btree_set("[a-z]{1,8}", 1..12)
        ) {
            let mut mode: Mode<()> = Mode::new("t", "p");
            for key in keys.iter().filter(|k| k.as_str() != ALL_OBJECTS) {
                mode.add_object(key, "something", None);
            }
            let expected = mode.objects().len();

            let targets = vec![ALL_OBJECTS.to_string()];
            let outcome = mode.run_command(&mut (), "look", &targets, &MemoryReporter::new());
            match outcome {
                Some(Outcome::Resolution(entries)) => {
                    prop_assert_eq!(entries.len(), expected);
                    prop_assert!(entries.iter().all(|(_, text)| text.is_some()));
                }
                Some(Outcome::Text(text)) => {
                    prop_assert_eq!(expected, 0);
                    prop_assert_eq!(text, NOTHING_HERE);
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        #[test]
        fn unknown_verbs_are_not_found(
            verb in "[a-z]{9,12}",
            targets in proptest::collection::vec("[a-z]{1,6}", 0..4)
        ) {
            let mut mode = menu();
            let outcome = mode.run_command(&mut (), &verb, &targets, &MemoryReporter::new());
            prop_assert_eq!(outcome, None);
        }

        #[test]
        fn re_adding_an_object_overwrites(
            key in "[a-z]{2,8}",
            first in "[a-z ]{0,20}",
            second in "[a-z ]{0,20}"
        ) {
            prop_assume!(key != ALL_OBJECTS);
            let mut mode = menu();
            mode.add_object(&key, &first, None);
            let size = mode.objects().len();
            mode.add_object(&key, &second, Some("hint"));
            prop_assert_eq!(mode.objects().len(), size);
            let stored = mode.objects().get(&key).map(|o| o.description.clone());
            prop_assert_eq!(stored, Some(second));
        }
    }
}
