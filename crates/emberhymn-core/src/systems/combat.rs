//! Combat resolver - damage application, death handling, and side effects.
//!
//! Three first-class paths: the player's melee strike, a monster's strike
//! against the player, and the ember burst AOE. The burst applies its own
//! flat damage rather than reusing the single-target path, so nothing is
//! ever hit twice by one ability.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{
    AttackerRef, CombatEffects, Dead, GridPos, Kind, MessageKind, MessageLog, Name, Stats,
};
use crate::constants::combat;

/// Result of a single player strike.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrikeOutcome {
    pub damage: i32,
    pub slain: bool,
    /// The target was the level boss and it fell - the level-clear signal.
    pub boss_felled: bool,
}

/// Result of an ember burst attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstOutcome {
    /// Ember pool below cost; nothing changed.
    NotEnoughEmber,
    Unleashed { hits: u32, kills: u32 },
}

/// Player melee strike against a world entity.
///
/// Damage is `floor(strength * (1 + U(0, 0.5)))`. Every hit grants ember;
/// a kill marks the target [`Dead`], heals the player, and reports
/// `boss_felled` when the victim was the boss.
pub fn player_strike(
    world: &mut World,
    target: Entity,
    player: &mut Stats,
    log: &mut MessageLog,
    effects: &mut CombatEffects,
    rng: &mut impl Rng,
) -> StrikeOutcome {
    let damage = (player.strength as f32 * (1.0 + rng.gen::<f32>() * 0.5)).floor() as i32;

    let (name, pos, kind, slain) = {
        let Ok(mut stats) = world.get::<&mut Stats>(target) else {
            return StrikeOutcome::default();
        };
        let slain = stats.take_damage(damage);
        let name = world
            .get::<&Name>(target)
            .map(|n| n.0.clone())
            .unwrap_or_default();
        let pos = world.get::<&GridPos>(target).map(|p| *p).ok();
        let kind = world.get::<&Kind>(target).map(|k| *k).ok();
        (name, pos, kind, slain)
    };

    effects.last_hit = pos;
    effects.attacker = Some(AttackerRef::Player);
    log.push(format!("Hit {name} for {damage} dmg!"), MessageKind::Combat);
    player.gain_ember(combat::EMBER_GAIN_ON_HIT);

    let mut boss_felled = false;
    if slain {
        let _ = world.insert_one(target, Dead);
        log.push(format!("{name} defeated!"), MessageKind::Loot);
        player.heal(combat::KILL_HEAL);
        if kind.is_some_and(|k| k.is_boss()) {
            log.push(
                format!("THE {} HAS FALLEN!", name.to_uppercase()),
                MessageKind::Lore,
            );
            boss_felled = true;
        }
    }

    StrikeOutcome {
        damage,
        slain,
        boss_felled,
    }
}

/// Monster or boss strike against the player.
///
/// Damage is `floor(strength * (0.8 + U(0, 0.4)))`. Returns true when the
/// player falls; the caller transitions the session to game over and stops
/// processing the tick.
pub fn monster_strike(
    world: &World,
    attacker: Entity,
    player: &mut Stats,
    player_pos: GridPos,
    log: &mut MessageLog,
    effects: &mut CombatEffects,
    rng: &mut impl Rng,
) -> bool {
    let Ok(strength) = world.get::<&Stats>(attacker).map(|s| s.strength) else {
        return false;
    };
    let name = world
        .get::<&Name>(attacker)
        .map(|n| n.0.clone())
        .unwrap_or_default();

    let damage = (strength as f32 * (0.8 + rng.gen::<f32>() * 0.4)).floor() as i32;
    let down = player.take_damage(damage);

    log.push(format!("{name} hits you for {damage} dmg!"), MessageKind::Combat);
    effects.last_hit = Some(player_pos);
    effects.attacker = Some(AttackerRef::Monster(attacker));

    if down {
        log.push("You have succumbed to the darkness...", MessageKind::Combat);
    }
    down
}

/// Ember burst AOE: flat damage to every living entity within Manhattan
/// distance 2 of the player.
///
/// Kills share the normal death/log policy but grant no heal and no
/// boss-victory signal.
pub fn ember_burst(
    world: &mut World,
    player_pos: GridPos,
    player: &mut Stats,
    log: &mut MessageLog,
    effects: &mut CombatEffects,
) -> BurstOutcome {
    if !player.spend_ember(combat::EMBER_BURST_COST) {
        log.push("Not enough Ember!", MessageKind::Info);
        return BurstOutcome::NotEnoughEmber;
    }

    log.push("EMBER BURST!", MessageKind::Combat);
    effects.attacker = Some(AttackerRef::Player);

    let targets: Vec<(Entity, GridPos)> = world
        .query::<(&GridPos, Option<&Dead>)>()
        .iter()
        .filter(|(_, (pos, dead))| {
            dead.is_none() && pos.manhattan(&player_pos) <= combat::EMBER_BURST_RADIUS
        })
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect();

    let mut hits = 0;
    let mut kills = 0;
    for (entity, pos) in targets {
        let (name, slain) = {
            let Ok(mut stats) = world.get::<&mut Stats>(entity) else {
                continue;
            };
            let slain = stats.take_damage(combat::EMBER_BURST_DAMAGE);
            let name = world
                .get::<&Name>(entity)
                .map(|n| n.0.clone())
                .unwrap_or_default();
            (name, slain)
        };

        effects.last_hit = Some(pos);
        hits += 1;
        if slain {
            let _ = world.insert_one(entity, Dead);
            log.push(format!("{name} incinerated!"), MessageKind::Loot);
            kills += 1;
        }
    }

    BurstOutcome::Unleashed { hits, kills }
}
