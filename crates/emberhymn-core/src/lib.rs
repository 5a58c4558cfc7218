//! Emberhymn Core - Dungeon-Crawler Simulation Engine
//!
//! Pure in-memory simulation of a descent through procedurally generated
//! dungeon levels: tile-grid movement, melee and AOE combat, and a
//! timer-driven enemy tick. There is no rendering, input mapping, or
//! persistence here; a frontend feeds intents in and renders the state
//! snapshots back out.
//!
//! # Architecture
//!
//! - **Components**: pure data - tiles, positions, stats, entity kinds,
//!   the message log. Each level owns a `hecs::World` of its inhabitants.
//! - **Generation**: carves a connected room-and-corridor layout and
//!   populates it for a depth.
//! - **Systems**: combat resolution, the enemy AI step, and passive regen.
//! - **Engine**: [`engine::GameSession`], the single owner of all mutable
//!   state. Input handlers and the tick driver are `&mut self` methods, so
//!   mutations are serialized by construction.
//!
//! # Example
//!
//! ```rust,no_run
//! use emberhymn_core::prelude::*;
//!
//! let mut session = GameSession::new();
//! session.start();
//!
//! loop {
//!     session.update(1.0 / 60.0); // host frame time
//!     session.attempt_move(1, 0); // from host input
//! }
//! ```

pub mod components;
pub mod constants;
pub mod engine;
pub mod generation;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{EntityView, GamePhase, GameSession};
}
