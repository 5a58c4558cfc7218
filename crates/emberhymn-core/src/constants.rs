//! Game constants - map dimensions, combat tuning, tick cadences.
//!
//! Plain constants with no engine dependency so both the core systems and
//! the native simtest harness can share them.

pub mod map {
    /// Dungeon grid width in tiles.
    pub const WIDTH: i32 = 40;
    /// Dungeon grid height in tiles.
    pub const HEIGHT: i32 = 40;

    /// Room placement attempts per level (inclusive range).
    pub const MIN_ROOM_ATTEMPTS: u32 = 8;
    pub const MAX_ROOM_ATTEMPTS: u32 = 12;

    /// Room side length bounds (inclusive).
    pub const ROOM_MIN_SIZE: i32 = 4;
    pub const ROOM_MAX_SIZE: i32 = 9;

    /// Chance for a non-start, non-boss room to hold a chest.
    pub const CHEST_CHANCE: f32 = 0.3;
    /// Chance for a spawned enemy to roll elite.
    pub const ELITE_CHANCE: f32 = 0.2;
}

pub mod player {
    pub const MAX_HP: i32 = 100;
    pub const MAX_STAMINA: i32 = 100;
    pub const MAX_EMBER: i32 = 100;
    pub const STRENGTH: i32 = 10;
}

pub mod combat {
    /// Ember cost of the burst ability.
    pub const EMBER_BURST_COST: i32 = 50;
    /// Flat damage dealt by the burst, bypassing the strength formula.
    pub const EMBER_BURST_DAMAGE: i32 = 50;
    /// Manhattan radius of the burst.
    pub const EMBER_BURST_RADIUS: i32 = 2;

    /// Ember granted to the player on every successful hit.
    pub const EMBER_GAIN_ON_HIT: i32 = 5;
    /// Health restored to the player on a kill.
    pub const KILL_HEAL: i32 = 5;
    /// Stamina restored per regen tick.
    pub const STAMINA_REGEN: i32 = 1;

    /// Monsters farther than this (Euclidean) from the player stay idle.
    pub const AGGRO_RADIUS: f32 = 8.0;
    /// Monsters closer than this (Euclidean) attack instead of moving.
    pub const MELEE_RADIUS: f32 = 1.5;
}

pub mod ticks {
    /// Seconds between enemy AI steps.
    pub const AI_INTERVAL: f64 = 0.8;
    /// Seconds between stamina regen steps.
    pub const REGEN_INTERVAL: f64 = 0.1;
}

pub mod chest {
    pub const MAX_HP_BONUS: i32 = 10;
    pub const STRENGTH_BONUS: i32 = 2;
}

pub mod messages {
    /// Rolling message log capacity; oldest entries evict first.
    pub const MAX_ENTRIES: usize = 20;
}
