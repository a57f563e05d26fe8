//! A player's adventure and its persisted form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};
use crate::world::World;

/// Version written into every save document.
pub const SAVE_VERSION: u32 = 1;

/// A named player exploring a [`World`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adventure {
    player: String,
    /// The world being explored.
    pub world: World,
}

impl Adventure {
    /// Start a fresh adventure.
    ///
    /// The name must be letters and spaces and must not be the reserved
    /// object key, since saves are listed as objects of the load menu.
    pub fn new(player: &str) -> WorldResult<Self> {
        let player = tf_core::sanitize(player)
            .ok()
            .flatten()
            .ok_or_else(|| WorldError::InvalidPlayerName(player.to_string()))?;
        if player == tf_core::ALL_OBJECTS {
            return Err(WorldError::ReservedPlayerName(player));
        }
        Ok(Self {
            player,
            world: World::default(),
        })
    }

    /// The player's name.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Page title for the current location.
    pub fn location_title(&self) -> &str {
        &self.world.location
    }

    /// One-line summary shown in the load menu.
    pub fn summary(&self) -> String {
        if self.world.is_won() {
            format!("Player {} has beaten the troll.", self.player)
        } else {
            format!("Player {} is... doing things...", self.player)
        }
    }

    /// Snapshot for persistence.
    pub fn to_save(&self) -> SaveDocument {
        SaveDocument {
            version: SAVE_VERSION,
            player: self.player.clone(),
            saved_at: Utc::now(),
            world: self.world.clone(),
        }
    }

    /// Restore from a save document.
    pub fn from_save(doc: SaveDocument) -> WorldResult<Self> {
        if doc.version != SAVE_VERSION {
            return Err(WorldError::UnsupportedSave {
                found: doc.version,
                expected: SAVE_VERSION,
            });
        }
        let mut adventure = Self::new(&doc.player)?;
        tracing::debug!(
            player = %adventure.player,
            saved_at = %doc.saved_at,
            "restoring adventure"
        );
        adventure.world = doc.world;
        Ok(adventure)
    }
}

/// The persisted form of an [`Adventure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDocument {
    /// Format version.
    pub version: u32,
    /// Player name.
    pub player: String,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// World state.
    pub world: World,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_adventure_cleans_name() {
        let adventure = Adventure::new("  Sir  Robin ").unwrap();
        assert_eq!(adventure.player(), "sir robin");
        assert_eq!(adventure.location_title(), "A New Journey");
        assert_eq!(adventure.summary(), "Player sir robin is... doing things...");
    }

    #[test]
    fn invalid_names_are_refused() {
        assert_eq!(
            Adventure::new("   "),
            Err(WorldError::InvalidPlayerName("   ".to_string()))
        );
        assert!(Adventure::new("r2d2").is_err());
    }

    #[test]
    fn reserved_names_are_refused() {
        assert_eq!(
            Adventure::new(" ALL "),
            Err(WorldError::ReservedPlayerName("all".to_string()))
        );
        assert!(Adventure::new("all of us").is_ok());
    }

    #[test]
    fn save_document_restores_world() {
        let mut adventure = Adventure::new("bob").unwrap();
        adventure.world.cow_push_count = 3;
        adventure.world.enemy_hp = 0;

        let json = serde_json::to_string(&adventure.to_save()).unwrap();
        let doc: SaveDocument = serde_json::from_str(&json).unwrap();
        let restored = Adventure::from_save(doc).unwrap();

        assert_eq!(restored, adventure);
        assert_eq!(restored.summary(), "Player bob has beaten the troll.");
    }

    #[test]
    fn future_saves_are_rejected() {
        let mut doc = Adventure::new("bob").unwrap().to_save();
        doc.version = SAVE_VERSION + 1;
        assert!(matches!(
            Adventure::from_save(doc),
            Err(WorldError::UnsupportedSave { found: 2, .. })
        ));
    }
}
