//! World and entity model for the simulation.
//!
//! Components are pure data. Behavior lives in the systems and the engine.

mod common;
mod dungeon;
mod effects;
mod messages;
mod monsters;
mod stats;
mod themes;

pub use common::*;
pub use dungeon::*;
pub use effects::*;
pub use messages::*;
pub use monsters::*;
pub use stats::*;
pub use themes::*;
