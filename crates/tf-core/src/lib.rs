//! Engine core for Taleforge.
//!
//! Holds the pieces every other crate builds on: the per-screen command
//! registry ([`Mode`]), the tagged [`Outcome`] a command produces, player input
//! sanitizing, the channel pair connecting the logic thread to the
//! presentation loop, and fault reporting.

/// Logic/presentation channel pair.
pub mod channel;
/// Error types for the engine core.
pub mod error;
/// Fault reporting.
pub mod fault;
/// Player input sanitizing.
pub mod input;
/// Per-screen command and object registry.
pub mod mode;
/// Command outcomes.
pub mod outcome;

pub use channel::{Directive, LogicEnd, PlayerInput, PresentationEnd, presentation_channel};
pub use error::{ChannelError, HandlerError, HandlerResult, InputError};
pub use fault::{FaultRecord, FaultReporter, MemoryReporter, TracingReporter};
pub use input::{PlayerCommand, is_affirmative, sanitize};
pub use mode::{ALL_OBJECTS, Mode, NOTHING_HERE, ObjectRef, Objects};
pub use outcome::{ModeChange, Outcome, SessionCommand};
