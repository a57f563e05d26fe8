//! Demo adventure for Taleforge.
//!
//! A single location holding a cow, a box and a troll. Provides the world
//! state, the save document it serializes into and the gameplay modes.

/// The player's adventure and its save document.
pub mod adventure;
/// Error types for adventure content.
pub mod error;
/// Gameplay modes.
pub mod modes;
/// World state and interactions.
pub mod world;

pub use adventure::{Adventure, SAVE_VERSION, SaveDocument};
pub use error::{WorldError, WorldResult};
pub use modes::{AdventureContext, START_SIGNATURE, modes};
pub use world::World;
