//! Systems - logic that operates on the world model.

mod ai;
mod combat;
mod regen;

pub use ai::*;
pub use combat::*;
pub use regen::*;
