//! Game session - the single owner of all mutable simulation state.
//!
//! Input handlers and the tick driver all take `&mut self`, so exactly one
//! mutation runs at a time and every AI tick sees a consistent snapshot.
//! A host embedding the core in a threaded environment wraps the session
//! in a mutex or hands it to one owner task.

use log::debug;
use serde::Serialize;

use crate::components::{
    CombatEffects, Dead, Direction, Dungeon, GridPos, Kind, MessageKind, MessageLog, Name, Stats,
    TileKind,
};
use crate::constants::{chest, ticks};
use crate::generation::generate_dungeon;
use crate::systems::{ember_burst, enemy_ai_system, player_strike, regen_system};

/// Session phase. Ticks run only while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
    Victory,
    Paused,
}

/// Read-only entity snapshot for the presentation layer. Hp is already
/// clamped, so it never renders negative.
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: Kind,
    pub pos: GridPos,
    pub name: String,
    pub stats: Stats,
    pub dead: bool,
}

/// One running game. Holds at most one dungeon; descent replaces it
/// wholesale.
pub struct GameSession {
    phase: GamePhase,
    depth: u32,
    dungeon: Option<Dungeon>,
    player_pos: GridPos,
    player_stats: Stats,
    messages: MessageLog,
    effects: CombatEffects,
    sim_time: f64,
    last_ai_tick: f64,
    last_regen_tick: f64,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            depth: 0,
            dungeon: None,
            player_pos: GridPos::default(),
            player_stats: Stats::player(),
            messages: MessageLog::new(),
            effects: CombatEffects::default(),
            sim_time: 0.0,
            last_ai_tick: 0.0,
            last_regen_tick: 0.0,
        }
    }

    /// Begin a fresh run at depth 1.
    pub fn start(&mut self) {
        let mut rng = rand::thread_rng();
        let dungeon = generate_dungeon(1, &mut rng);

        self.depth = 1;
        self.player_pos = dungeon.start;
        self.player_stats = Stats::player();
        self.messages.clear();
        self.effects.reset();
        self.sim_time = 0.0;
        self.last_ai_tick = 0.0;
        self.last_regen_tick = 0.0;

        self.messages.push(
            format!("You enter the {}...", dungeon.theme.config().name),
            MessageKind::Lore,
        );
        self.dungeon = Some(dungeon);
        self.phase = GamePhase::Playing;
        debug!("session started");
    }

    /// Tear the run down and drop the level.
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.dungeon = None;
        self.effects.reset();
        debug!("session returned to menu");
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    /// Switch to the victory screen. The core never enters this phase on
    /// its own; a frontend calls this after surfacing the boss-felled
    /// fanfare, and ticks stop like any other non-Playing phase.
    pub fn set_victory(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Victory;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            // Ticks restart from now; no partial tick survives a pause.
            self.last_ai_tick = self.sim_time;
            self.last_regen_tick = self.sim_time;
        }
    }

    /// Advance the clock. The AI and regen cadences fire independently;
    /// both are inert outside the `Playing` phase.
    pub fn update(&mut self, delta_seconds: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.sim_time += delta_seconds;

        if self.sim_time - self.last_ai_tick >= ticks::AI_INTERVAL {
            self.last_ai_tick = self.sim_time;
            self.run_ai_tick();
        }

        if self.phase == GamePhase::Playing
            && self.sim_time - self.last_regen_tick >= ticks::REGEN_INTERVAL
        {
            self.last_regen_tick = self.sim_time;
            regen_system(&mut self.player_stats);
        }
    }

    fn run_ai_tick(&mut self) {
        let Some(dungeon) = self.dungeon.as_mut() else {
            return;
        };
        let mut rng = rand::thread_rng();
        let player_down = enemy_ai_system(
            dungeon,
            self.player_pos,
            &mut self.player_stats,
            &mut self.messages,
            &mut self.effects,
            &mut rng,
        );
        if player_down {
            self.phase = GamePhase::GameOver;
            debug!("player down at depth {}", self.depth);
        }
    }

    /// Handle a cardinal move intent. Depending on the target cell this
    /// becomes a step, an attack, a chest pickup, or a descent; every
    /// invalid intent is a silent no-op.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) {
        if self.phase != GamePhase::Playing || dx.abs() + dy.abs() != 1 {
            return;
        }
        let Some(dungeon) = self.dungeon.as_mut() else {
            return;
        };

        let target = self.player_pos.offset(dx, dy);
        let Some(tile) = dungeon.tile(target) else {
            return;
        };
        if tile.blocks_movement() {
            return;
        }

        if let Some(entity) = dungeon.living_entity_at(target) {
            let Ok(kind) = dungeon.world.get::<&Kind>(entity).map(|k| *k) else {
                return;
            };
            match kind {
                Kind::Enemy { .. } | Kind::Boss { .. } => {
                    let mut rng = rand::thread_rng();
                    let outcome = player_strike(
                        &mut dungeon.world,
                        entity,
                        &mut self.player_stats,
                        &mut self.messages,
                        &mut self.effects,
                        &mut rng,
                    );
                    if outcome.boss_felled {
                        self.effects.boss_felled = true;
                    }
                }
                Kind::Chest => {
                    self.player_stats.max_hp += chest::MAX_HP_BONUS;
                    self.player_stats.strength += chest::STRENGTH_BONUS;
                    self.player_stats.hp = self.player_stats.max_hp;
                    let _ = dungeon.world.insert_one(entity, Dead);
                    self.messages.push(
                        "Opened a chest! Found Ember essence.",
                        MessageKind::Loot,
                    );
                }
            }
            // The player never relocates into an occupied cell.
            return;
        }

        if tile == TileKind::Door {
            if dungeon.living_boss().is_some() {
                self.messages.push(
                    "The door is sealed by the Boss's presence!",
                    MessageKind::Lore,
                );
                return;
            }
            self.descend();
            return;
        }

        self.player_pos = target;
        dungeon.reveal_around(target);
    }

    /// Convenience wrapper for hosts that speak [`Direction`].
    pub fn step(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        self.attempt_move(dx, dy);
    }

    /// Trigger the ember burst ability.
    pub fn ember_burst(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(dungeon) = self.dungeon.as_mut() else {
            return;
        };
        ember_burst(
            &mut dungeon.world,
            self.player_pos,
            &mut self.player_stats,
            &mut self.messages,
            &mut self.effects,
        );
    }

    /// Regenerate at the next depth: reposition to the new start, restore
    /// hp and stamina, fresh fog-of-war.
    fn descend(&mut self) {
        let depth = self.depth + 1;
        let mut rng = rand::thread_rng();
        let dungeon = generate_dungeon(depth, &mut rng);

        self.depth = depth;
        self.player_pos = dungeon.start;
        self.dungeon = Some(dungeon);
        self.effects.reset();

        self.messages
            .push(format!("Descended to depth {depth}."), MessageKind::Info);
        self.player_stats.hp = self.player_stats.max_hp;
        self.player_stats.stamina = self.player_stats.max_stamina;
        self.messages
            .push("Rested at the checkpoint. Health restored.", MessageKind::Info);
    }

    // --- Snapshot accessors for the presentation layer ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn dungeon(&self) -> Option<&Dungeon> {
        self.dungeon.as_ref()
    }

    pub fn player_pos(&self) -> GridPos {
        self.player_pos
    }

    pub fn player_stats(&self) -> &Stats {
        &self.player_stats
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn effects(&self) -> &CombatEffects {
        &self.effects
    }

    /// Presentation clears hit markers on its own timer.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// Full entity snapshot, dead entities included (renderers filter).
    pub fn entities(&self) -> Vec<EntityView> {
        let Some(dungeon) = self.dungeon.as_ref() else {
            return Vec::new();
        };
        dungeon
            .world
            .query::<(&Kind, &GridPos, &Name, &Stats, Option<&Dead>)>()
            .iter()
            .map(|(entity, (kind, pos, name, stats, dead))| EntityView {
                id: entity.to_bits().get(),
                kind: *kind,
                pos: *pos,
                name: name.0.clone(),
                stats: *stats,
                dead: dead.is_some(),
            })
            .collect()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Theme, TileKind};
    use hecs::World;

    fn floor_dungeon(size: i32) -> Dungeon {
        Dungeon {
            depth: 1,
            theme: Theme::AshCaverns,
            tiles: vec![vec![TileKind::Floor; size as usize]; size as usize],
            world: World::new(),
            start: GridPos::new(1, 1),
            exit: GridPos::new(size - 2, size - 2),
            width: size,
            height: size,
            discovered: vec![vec![false; size as usize]; size as usize],
        }
    }

    fn playing_session(dungeon: Dungeon) -> GameSession {
        let mut session = GameSession::new();
        session.player_pos = dungeon.start;
        session.depth = dungeon.depth;
        session.dungeon = Some(dungeon);
        session.phase = GamePhase::Playing;
        session
    }

    #[test]
    fn test_move_reveals_5x5_block() {
        let mut session = playing_session(floor_dungeon(12));
        session.attempt_move(1, 0);

        assert_eq!(session.player_pos, GridPos::new(2, 1));
        let dungeon = session.dungeon().unwrap();
        for y in 0..12 {
            for x in 0..12 {
                let inside = (0..=4).contains(&x) && (0..=3).contains(&y);
                assert_eq!(
                    dungeon.discovered[y as usize][x as usize],
                    inside,
                    "({x},{y})"
                );
            }
        }
    }

    #[test]
    fn test_wall_and_bounds_reject_silently() {
        let mut dungeon = floor_dungeon(8);
        dungeon.tiles[1][2] = TileKind::Wall;
        let mut session = playing_session(dungeon);

        session.attempt_move(1, 0); // wall
        session.attempt_move(0, -1);
        session.attempt_move(-1, 0);
        session.attempt_move(0, -1); // out of bounds from (0, 0)
        assert_eq!(session.player_pos, GridPos::new(0, 0));
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_non_cardinal_intents_are_rejected() {
        let mut session = playing_session(floor_dungeon(8));
        session.attempt_move(1, 1);
        session.attempt_move(0, 0);
        session.attempt_move(2, 0);
        assert_eq!(session.player_pos, GridPos::new(1, 1));
    }

    #[test]
    fn test_moving_into_monster_attacks_without_relocating() {
        let mut dungeon = floor_dungeon(8);
        let monster = dungeon.world.spawn((
            Kind::Enemy { elite: false },
            Name::new("Ash Walker"),
            GridPos::new(2, 1),
            Stats::enemy(1, false),
        ));
        let mut session = playing_session(dungeon);

        session.attempt_move(1, 0);
        assert_eq!(session.player_pos, GridPos::new(1, 1));
        let hp = session
            .dungeon()
            .unwrap()
            .world
            .get::<&Stats>(monster)
            .unwrap()
            .hp;
        assert!(hp < Stats::enemy(1, false).hp);
        assert_eq!(session.player_stats().ember, 5);
    }

    #[test]
    fn test_chest_grants_reward_and_consumes() {
        let mut dungeon = floor_dungeon(8);
        let chest_entity = dungeon.world.spawn((
            Kind::Chest,
            Name::new("Ancient Cache"),
            GridPos::new(2, 1),
            Stats::inert(),
        ));
        let mut session = playing_session(dungeon);
        session.player_stats.hp = 60;

        session.attempt_move(1, 0);
        assert_eq!(session.player_pos, GridPos::new(1, 1));
        assert_eq!(session.player_stats().max_hp, 110);
        assert_eq!(session.player_stats().hp, 110);
        assert_eq!(session.player_stats().strength, 12);
        assert!(session
            .dungeon()
            .unwrap()
            .world
            .get::<&Dead>(chest_entity)
            .is_ok());

        // A consumed chest no longer blocks the cell.
        session.attempt_move(1, 0);
        assert_eq!(session.player_pos, GridPos::new(2, 1));
    }

    #[test]
    fn test_door_sealed_while_boss_lives() {
        let mut dungeon = floor_dungeon(8);
        dungeon.tiles[1][2] = TileKind::Door;
        dungeon.world.spawn((
            Kind::Boss { phase: 1 },
            Name::new("The Ashbound Knight"),
            GridPos::new(5, 5),
            Stats::boss(1),
        ));
        let mut session = playing_session(dungeon);

        session.attempt_move(1, 0);
        assert_eq!(session.player_pos, GridPos::new(1, 1));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.depth(), 1);
        assert_eq!(session.messages().latest().unwrap().kind, MessageKind::Lore);
    }

    #[test]
    fn test_door_descends_once_boss_is_dead() {
        let mut dungeon = floor_dungeon(8);
        dungeon.tiles[1][2] = TileKind::Door;
        let boss = dungeon.world.spawn((
            Kind::Boss { phase: 1 },
            Name::new("The Ashbound Knight"),
            GridPos::new(5, 5),
            Stats::boss(1),
        ));
        dungeon.world.insert_one(boss, Dead).unwrap();
        let mut session = playing_session(dungeon);
        session.player_stats.hp = 25;
        session.player_stats.stamina = 10;

        session.attempt_move(1, 0);
        assert_eq!(session.depth(), 2);
        let new_dungeon = session.dungeon().unwrap();
        assert_eq!(session.player_pos(), new_dungeon.start);
        assert_eq!(session.player_stats().hp, session.player_stats().max_hp);
        assert_eq!(
            session.player_stats().stamina,
            session.player_stats().max_stamina
        );
        // Fresh level, fresh fog.
        assert!(new_dungeon
            .discovered
            .iter()
            .all(|row| row.iter().all(|d| !d)));
    }

    #[test]
    fn test_player_defeat_ends_session() {
        let mut dungeon = floor_dungeon(8);
        dungeon.world.spawn((
            Kind::Enemy { elite: false },
            Name::new("Ash Walker"),
            GridPos::new(2, 1),
            Stats::enemy(1, false),
        ));
        let mut session = playing_session(dungeon);
        session.player_stats.hp = 1;

        // Enough time for one AI tick; the adjacent monster strikes.
        session.update(1.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.player_stats().hp, 0);

        // A dead session ignores further input and time.
        session.attempt_move(1, 0);
        session.update(10.0);
        assert_eq!(session.player_pos(), GridPos::new(1, 1));
    }

    #[test]
    fn test_regen_ticks_with_time() {
        let mut session = playing_session(floor_dungeon(8));
        session.player_stats.stamina = 0;

        for _ in 0..5 {
            session.update(0.1);
        }
        assert!(session.player_stats().stamina >= 4);
        assert!(session.player_stats().stamina <= 5);
    }

    #[test]
    fn test_pause_gates_ticks() {
        let mut session = playing_session(floor_dungeon(8));
        session.player_stats.stamina = 0;
        session.pause();
        session.update(5.0);
        assert_eq!(session.player_stats().stamina, 0);

        session.resume();
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_set_victory_gates_on_playing() {
        let mut session = GameSession::new();
        // No run in progress; nothing to win.
        session.set_victory();
        assert_eq!(session.phase(), GamePhase::Menu);

        let mut session = playing_session(floor_dungeon(8));
        session.player_stats.stamina = 0;
        session.set_victory();
        assert_eq!(session.phase(), GamePhase::Victory);

        // Victory freezes the clock like any other non-Playing phase.
        session.update(5.0);
        assert_eq!(session.player_stats().stamina, 0);
        session.attempt_move(1, 0);
        assert_eq!(session.player_pos(), GridPos::new(1, 1));
    }

    #[test]
    fn test_start_enters_playing_with_level() {
        let mut session = GameSession::new();
        session.start();

        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.depth(), 1);
        let dungeon = session.dungeon().unwrap();
        assert_eq!(session.player_pos(), dungeon.start);
        assert_eq!(
            dungeon.tile(dungeon.start),
            Some(TileKind::SafeZone)
        );
        assert_eq!(session.messages().latest().unwrap().kind, MessageKind::Lore);

        session.return_to_menu();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.dungeon().is_none());
        assert!(session.entities().is_empty());
    }

    #[test]
    fn test_ember_burst_through_session() {
        let mut dungeon = floor_dungeon(8);
        let monster = dungeon.world.spawn((
            Kind::Enemy { elite: false },
            Name::new("Ash Walker"),
            GridPos::new(2, 2),
            Stats::enemy(1, false),
        ));
        let mut session = playing_session(dungeon);
        session.player_stats.ember = 50;

        session.ember_burst();
        assert_eq!(session.player_stats().ember, 0);
        assert!(session
            .dungeon()
            .unwrap()
            .world
            .get::<&Dead>(monster)
            .is_ok());
    }
}
