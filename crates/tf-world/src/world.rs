//! World state and the interactions that mutate it.

use serde::{Deserialize, Serialize};
use tf_core::{ALL_OBJECTS, Objects};

/// Pushes it takes to roll the cow over.
pub const COW_ROLL_PUSHES: u32 = 5;

/// Mutable state of the demo location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// How often the cow has been pushed.
    pub cow_push_count: u32,
    /// What the box contains.
    pub box_secret: String,
    /// What enemies say when hit.
    pub enemy_reaction: String,
    /// Remaining enemy hit points; negative once overkilled.
    pub enemy_hp: i32,
    /// Objects that can be opened.
    pub containers: Vec<String>,
    /// Objects that can be pushed.
    pub pushables: Vec<String>,
    /// Objects that can be fought.
    pub enemies: Vec<String>,
    /// Name of the current location.
    pub location: String,
}

impl Default for World {
    fn default() -> Self {
        Self {
            cow_push_count: 0,
            box_secret: "A magical potato!".to_string(),
            enemy_reaction: "Ow...".to_string(),
            enemy_hp: 4,
            containers: vec!["box".to_string()],
            pushables: vec!["cow".to_string()],
            enemies: vec!["troll".to_string()],
            location: "A New Journey".to_string(),
        }
    }
}

fn names(list: &[String], target: &str) -> bool {
    list.iter().any(|item| item == target)
}

impl World {
    /// `use`: does nothing much, enthusiastically.
    pub fn use_things(&self, player: &str, objects: &Objects, targets: &[String]) -> String {
        if targets.is_empty() {
            return format!("Nice work, {player}, you do stuff real good.");
        }
        if targets.iter().any(|t| t == ALL_OBJECTS) {
            return "You go and \"use\" absolutely everything in your sight. Good job?".to_string();
        }

        let mut result: String = objects
            .keys()
            .filter(|key| targets.iter().any(|t| t == key))
            .map(|key| format!("Nice work, {player}, you really used that \"{key}\"...\n"))
            .collect();
        if result.is_empty() {
            result = format!("What use is that ol \"{}\" anyway?\n", targets[0]);
        }
        format!("{result}Maybe try something else?")
    }

    /// `open`: reveals what a container holds.
    pub fn open(&self, objects: &Objects, targets: &[String]) -> String {
        let [target] = targets else {
            if targets.is_empty() {
                return "You need to specify what you're trying to open...".to_string();
            }
            return "You can only open 1 thing at a time!".to_string();
        };
        if target == ALL_OBJECTS {
            return "You can only open 1 thing at a time!".to_string();
        }
        if !objects.contains(target) {
            return format!("There is no \"{target}\" here to open...");
        }
        if !names(&self.containers, target) {
            return format!("You can't open \"{target}\", but nice try...");
        }
        format!("Inside of \"{target}\" there is..... {}", self.box_secret)
    }

    /// `attack`: hits things; enemies lose a hit point per blow.
    pub fn attack(&mut self, objects: &Objects, targets: &[String]) -> String {
        if targets.is_empty() {
            return "You need to specify what you're trying to attack...".to_string();
        }
        if let Some(missing) = targets.iter().find(|t| !objects.contains(t)) {
            return format!("There is no \"{missing}\" here to attack...");
        }
        if targets.iter().any(|t| t == ALL_OBJECTS) {
            return "You fight the whole world and lose.\nEventually you get up and can try again."
                .to_string();
        }

        let mut result = String::new();
        for target in targets {
            if !names(&self.enemies, target) {
                result.push_str(&format!("You hit \"{target}\" with all your might...\n"));
                continue;
            }
            self.enemy_hp -= 1;
            let line = match self.enemy_hp {
                hp if hp < 0 => {
                    format!("\"{target}\" is already dead... Your cruelty knows no bounds.\n")
                }
                0 => format!(
                    "\"{target}\" succumbs to your incredible violence. Congratulations, you win!\n\
                     You can \"quit\" now, proud of your accomplishments.\n"
                ),
                _ => format!(
                    "\"{target}\" cries out in pain...\n\"{}\", they say.\n",
                    self.enemy_reaction
                ),
            };
            result.push_str(&line);
        }
        format!("{result}With combat accomplished, what will you do next?")
    }

    /// `push`: the cow rolls over after enough pushes.
    pub fn push(&mut self, objects: &Objects, targets: &[String]) -> String {
        let target = match targets {
            [] => return "You need to specify what you're trying to push...".to_string(),
            [target] if target != ALL_OBJECTS => target,
            _ => return "You can only \"push\" one thing at a time...".to_string(),
        };
        if !objects.contains(target) {
            return format!("There is no \"{target}\" here to push...");
        }
        if !names(&self.pushables, target) {
            return format!("You shove \"{target}\" with all your might, but to no avail...");
        }

        self.cow_push_count += 1;
        match self.cow_push_count {
            1 => "You... push the cow. Congratulations.".to_string(),
            n if n < COW_ROLL_PUSHES => {
                "Again you push the cow. You seem to be... making some progress?".to_string()
            }
            COW_ROLL_PUSHES => {
                "You push the cow again and again until eventually... it rolls over! \
                 Achievement unlocked!"
                    .to_string()
            }
            _ => "You've already rolled over the cow.\nWhat more are you trying to accomplish???"
                .to_string(),
        }
    }

    /// Whether every enemy is down.
    pub fn is_won(&self) -> bool {
        self.enemy_hp <= 0
    }
}
