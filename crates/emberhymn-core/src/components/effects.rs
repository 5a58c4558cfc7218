//! Ephemeral visual-effect hints for the presentation layer.
//!
//! The core records where the last hit landed and who is mid-attack; the
//! renderer reads these and clears them on its own timer via
//! [`CombatEffects::clear`]. Nothing in the simulation depends on them.

use hecs::Entity;

use super::common::GridPos;

/// Who is currently shown attacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerRef {
    Player,
    Monster(Entity),
}

#[derive(Debug, Default)]
pub struct CombatEffects {
    /// Position of the most recent hit marker.
    pub last_hit: Option<GridPos>,
    /// Actor whose attack animation should play.
    pub attacker: Option<AttackerRef>,
    /// Set once the level boss falls; frontends surface the victory fanfare
    /// and may reset it after showing it.
    pub boss_felled: bool,
}

impl CombatEffects {
    pub fn clear(&mut self) {
        self.last_hit = None;
        self.attacker = None;
    }

    /// Full reset, used when a session starts or returns to the menu.
    pub fn reset(&mut self) {
        self.clear();
        self.boss_felled = false;
    }
}
