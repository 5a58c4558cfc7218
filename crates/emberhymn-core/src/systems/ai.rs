//! Enemy AI tick - greedy single-axis pursuit and melee attacks.

use hecs::Entity;
use rand::Rng;

use super::combat::monster_strike;
use crate::components::{CombatEffects, Dead, Dungeon, GridPos, Kind, MessageLog, Stats};
use crate::constants::combat;

/// One AI step for every living hostile. Decisions are computed from a
/// snapshot of positions taken at tick start, so no monster reacts to
/// another's move from the same tick.
///
/// Per monster: idle beyond [`combat::AGGRO_RADIUS`], melee inside
/// [`combat::MELEE_RADIUS`], otherwise one greedy step toward the player -
/// X axis first, Y as fallback when a wall blocks, staying put when both
/// do. Monsters never step onto the player's tile.
///
/// Returns true when the player falls; the rest of the tick is abandoned.
pub fn enemy_ai_system(
    dungeon: &mut Dungeon,
    player_pos: GridPos,
    player: &mut Stats,
    log: &mut MessageLog,
    effects: &mut CombatEffects,
    rng: &mut impl Rng,
) -> bool {
    let monsters: Vec<(Entity, GridPos)> = dungeon
        .world
        .query::<(&Kind, &GridPos, Option<&Dead>)>()
        .iter()
        .filter(|(_, (kind, _, dead))| kind.is_hostile() && dead.is_none())
        .map(|(entity, (_, pos, _))| (entity, *pos))
        .collect();

    for (entity, pos) in monsters {
        let dist = pos.distance(&player_pos);
        if dist > combat::AGGRO_RADIUS {
            continue;
        }

        if dist < combat::MELEE_RADIUS {
            if monster_strike(&dungeon.world, entity, player, player_pos, log, effects, rng) {
                return true;
            }
            continue;
        }

        let step_x = (player_pos.x - pos.x).signum();
        let step_y = (player_pos.y - pos.y).signum();

        let mut next = pos.offset(step_x, 0);
        if dungeon.blocks(next) {
            next = pos.offset(0, step_y);
            if dungeon.blocks(next) {
                continue;
            }
        }
        if next == player_pos {
            continue;
        }

        if let Ok(mut p) = dungeon.world.get::<&mut GridPos>(entity) {
            *p = next;
        }
    }

    false
}
