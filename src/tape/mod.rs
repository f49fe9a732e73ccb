//! Tapes: recorded interactions with matching and playback

mod engine;
mod index;
mod interaction;
mod registry;

pub use engine::{Tape, TapeStats};
pub use index::{InteractionIndex, InteractionStack};
pub use interaction::Interaction;
pub use registry::{validate_tape_name, TapeRegistry};

/// Name of a tape created without an explicit name
pub const DEFAULT_TAPE: &str = "default";
