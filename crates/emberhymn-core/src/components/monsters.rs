//! Entity kind components for dungeon inhabitants.
//!
//! The player is not a world entity; player position and stats live on the
//! session. Everything spawned into a level's world carries a [`Kind`].

use serde::{Deserialize, Serialize};

/// Tagged entity variant. Boss phase data exists only on the Boss variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Enemy { elite: bool },
    Boss { phase: u8 },
    Chest,
}

impl Kind {
    /// Hostiles participate in the AI tick and can be attacked into.
    pub fn is_hostile(&self) -> bool {
        matches!(self, Kind::Enemy { .. } | Kind::Boss { .. })
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Kind::Boss { .. })
    }
}

/// Marker component inserted on death. Dead entities are never despawned,
/// only filtered, so the log/history keeps referring to them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dead;
