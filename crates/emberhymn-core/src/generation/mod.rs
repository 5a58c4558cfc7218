//! Generation - procedural creation of dungeon levels.

mod dungeon;

pub use dungeon::*;
