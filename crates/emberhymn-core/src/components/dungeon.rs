//! Dungeon level - tile grid, fog-of-war memory, and the entity world.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::common::GridPos;
use super::monsters::{Dead, Kind};
use super::themes::Theme;

/// Tile variants. A grid is immutable once generated; a Door's passability
/// is gated by boss liveness, not by rewriting the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Void,
    Door,
    SafeZone,
}

impl TileKind {
    pub fn blocks_movement(&self) -> bool {
        matches!(self, TileKind::Wall)
    }
}

/// One generated level. Exclusively owns its entity collection; the session
/// replaces the whole value on descent, never patches it structurally.
pub struct Dungeon {
    pub depth: u32,
    pub theme: Theme,
    /// Row-major tile grid: `tiles[y][x]`, `height` rows of `width` columns.
    pub tiles: Vec<Vec<TileKind>>,
    /// Monsters, boss, and chest for this level.
    pub world: World,
    pub start: GridPos,
    pub exit: GridPos,
    pub width: i32,
    pub height: i32,
    /// Fog-of-war memory; same dimensions as `tiles`.
    pub discovered: Vec<Vec<bool>>,
}

impl Dungeon {
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn tile(&self, pos: GridPos) -> Option<TileKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// True when the position is outside the grid or a wall. Monsters and
    /// the player both treat this as impassable.
    pub fn blocks(&self, pos: GridPos) -> bool {
        match self.tile(pos) {
            Some(tile) => tile.blocks_movement(),
            None => true,
        }
    }

    /// Mark the 5x5 block centered on `pos` as discovered, clipped to the
    /// grid bounds.
    pub fn reveal_around(&mut self, pos: GridPos) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                let p = pos.offset(dx, dy);
                if self.in_bounds(p) {
                    self.discovered[p.y as usize][p.x as usize] = true;
                }
            }
        }
    }

    /// First living entity occupying `pos`, if any.
    pub fn living_entity_at(&self, pos: GridPos) -> Option<Entity> {
        self.world
            .query::<(&GridPos, Option<&Dead>)>()
            .iter()
            .find(|(_, (p, dead))| **p == pos && dead.is_none())
            .map(|(entity, _)| entity)
    }

    /// A living boss seals the exit door.
    pub fn living_boss(&self) -> Option<Entity> {
        self.world
            .query::<(&Kind, Option<&Dead>)>()
            .iter()
            .find(|(_, (kind, dead))| kind.is_boss() && dead.is_none())
            .map(|(entity, _)| entity)
    }
}
