//! Emberhymn Headless Simulation Harness
//!
//! Validates the simulation core without a frontend. Runs entirely
//! in-process — no rendering, no input devices, no timers beyond a
//! synthetic clock.
//!
//! Usage:
//!   cargo run -p emberhymn-simtest
//!   cargo run -p emberhymn-simtest -- --verbose

use emberhymn_core::components::{
    CombatEffects, Dead, GridPos, Kind, MessageLog, Name, Stats, Theme, TileKind,
};
use emberhymn_core::engine::{GamePhase, GameSession};
use emberhymn_core::generation::generate_dungeon;
use emberhymn_core::systems::{ember_burst, monster_strike, player_strike, BurstOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(results: &mut Vec<TestResult>, name: &str, passed: bool, detail: impl Into<String>) {
    results.push(TestResult {
        name: name.to_string(),
        passed,
        detail: detail.into(),
    });
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Emberhymn Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Generator structural invariants
    results.extend(validate_generator(verbose));

    // 2. Combat damage bounds
    results.extend(validate_combat_bounds(verbose));

    // 3. Door gating on boss liveness
    results.extend(validate_door_gating(verbose));

    // 4. Fog-of-war discovery
    results.extend(validate_discovery(verbose));

    // 5. End-to-end depth-1 fight
    results.extend(validate_end_to_end(verbose));

    // 6. Resource pool caps
    results.extend(validate_resource_caps(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for result in &results {
        let mark = if result.passed { "PASS" } else { "FAIL" };
        if !result.passed || verbose {
            println!("[{mark}] {} — {}", result.name, result.detail);
        }
    }
    println!("\n{passed}/{total} checks passed, {failed} failed");

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Validations ─────────────────────────────────────────────────────────

fn validate_generator(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    for depth in 1..=6u32 {
        let mut rng = StdRng::seed_from_u64(depth as u64 * 7919);
        let dungeon = generate_dungeon(depth, &mut rng);

        let mut safe_zones = 0;
        let mut doors = 0;
        let mut floors = 0;
        for row in &dungeon.tiles {
            for tile in row {
                match tile {
                    TileKind::SafeZone => safe_zones += 1,
                    TileKind::Door => doors += 1,
                    TileKind::Floor => floors += 1,
                    _ => {}
                }
            }
        }

        check(
            &mut results,
            &format!("generator depth {depth}: unique start/exit"),
            safe_zones == 1 && doors == 1,
            format!("{safe_zones} safe zones, {doors} doors, {floors} floor tiles"),
        );

        let bosses = dungeon
            .world
            .query::<&Kind>()
            .iter()
            .filter(|(_, kind)| kind.is_boss())
            .count();
        let expected_boss = Theme::for_depth(depth).config().boss_name;
        check(
            &mut results,
            &format!("generator depth {depth}: single themed boss"),
            bosses == 1,
            format!("{bosses} bosses, expected \"{expected_boss}\""),
        );

        let misplaced = dungeon
            .world
            .query::<&GridPos>()
            .iter()
            .filter(|(_, pos)| dungeon.blocks(**pos))
            .count();
        check(
            &mut results,
            &format!("generator depth {depth}: entities on open tiles"),
            misplaced == 0,
            format!("{misplaced} entities inside walls"),
        );

        if verbose {
            println!(
                "depth {depth}: {} entities, theme {:?}",
                dungeon.world.len(),
                dungeon.theme
            );
        }
    }

    results
}

fn validate_combat_bounds(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(42);

    let mut player_min = i32::MAX;
    let mut player_max = i32::MIN;
    let mut monster_min = i32::MAX;
    let mut monster_max = i32::MIN;

    for _ in 0..500 {
        let mut world = hecs::World::new();
        let mut stats = Stats::enemy(1, false);
        stats.hp = 10_000;
        stats.max_hp = 10_000;
        stats.strength = 5;
        let target = world.spawn((
            Kind::Enemy { elite: false },
            Name::new("Ash Walker"),
            GridPos::new(1, 0),
            stats,
        ));

        let mut player = Stats::player();
        let mut log = MessageLog::new();
        let mut effects = CombatEffects::default();

        let outcome = player_strike(
            &mut world, target, &mut player, &mut log, &mut effects, &mut rng,
        );
        player_min = player_min.min(outcome.damage);
        player_max = player_max.max(outcome.damage);

        let mut player = Stats::player();
        monster_strike(
            &world,
            target,
            &mut player,
            GridPos::new(0, 0),
            &mut log,
            &mut effects,
            &mut rng,
        );
        let lost = Stats::player().hp - player.hp;
        monster_min = monster_min.min(lost);
        monster_max = monster_max.max(lost);
    }

    check(
        &mut results,
        "combat: player damage within [S, 1.5S]",
        player_min >= 10 && player_max <= 15,
        format!("observed [{player_min}, {player_max}] for strength 10"),
    );
    check(
        &mut results,
        "combat: monster damage within [0.8S, 1.2S]",
        monster_min >= 4 && monster_max <= 6,
        format!("observed [{monster_min}, {monster_max}] for strength 5"),
    );

    // Lethal overkill must mark death and clamp hp at zero.
    let mut world = hecs::World::new();
    let target = world.spawn((
        Kind::Enemy { elite: false },
        Name::new("Ash Walker"),
        GridPos::new(1, 0),
        Stats::enemy(1, false),
    ));
    let mut player = Stats::player();
    player.strength = 9_999;
    let mut log = MessageLog::new();
    let mut effects = CombatEffects::default();
    let outcome = player_strike(
        &mut world, target, &mut player, &mut log, &mut effects, &mut rng,
    );
    let hp_after = world.get::<&Stats>(target).map(|s| s.hp).unwrap_or(-1);
    check(
        &mut results,
        "combat: overkill marks dead, hp clamped",
        outcome.slain && world.get::<&Dead>(target).is_ok() && hp_after == 0,
        format!("hp after overkill: {hp_after}"),
    );

    // Burst below cost is a complete no-op.
    let mut world = hecs::World::new();
    let bystander = world.spawn((
        Kind::Enemy { elite: false },
        Name::new("Ash Walker"),
        GridPos::new(0, 1),
        Stats::enemy(1, false),
    ));
    let mut player = Stats::player();
    player.ember = 49;
    let mut log = MessageLog::new();
    let mut effects = CombatEffects::default();
    let outcome = ember_burst(&mut world, GridPos::new(0, 0), &mut player, &mut log, &mut effects);
    let untouched = world
        .get::<&Stats>(bystander)
        .map(|s| s.hp == Stats::enemy(1, false).hp)
        .unwrap_or(false);
    check(
        &mut results,
        "combat: underfunded burst changes nothing",
        outcome == BurstOutcome::NotEnoughEmber && player.ember == 49 && untouched,
        format!("ember {}", player.ember),
    );

    results
}

fn validate_door_gating(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    // Every freshly generated level must arrive sealed.
    let mut session = GameSession::new();
    session.start();
    let sealed = session
        .dungeon()
        .map(|d| d.living_boss().is_some())
        .unwrap_or(false);
    check(
        &mut results,
        "door: freshly generated level is sealed",
        sealed,
        "living boss present at depth 1",
    );

    // The seal lifts the moment the boss is struck down through combat.
    let mut dungeon = {
        let mut rng = StdRng::seed_from_u64(88);
        generate_dungeon(1, &mut rng)
    };
    let boss = dungeon.living_boss().expect("generated level has a boss");
    let mut rng = StdRng::seed_from_u64(99);
    let mut player = Stats::player();
    player.strength = 9_999;
    let mut log = MessageLog::new();
    let mut effects = CombatEffects::default();
    let outcome = player_strike(
        &mut dungeon.world,
        boss,
        &mut player,
        &mut log,
        &mut effects,
        &mut rng,
    );
    check(
        &mut results,
        "door: seal lifts when the boss falls",
        outcome.boss_felled && dungeon.living_boss().is_none(),
        "boss death reported as level clear",
    );

    results
}

fn validate_discovery(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut session = GameSession::new();
    session.start();

    let start = session.dungeon().expect("level").start;
    // Probe the four cardinal neighbours for an open first step.
    let step = [(1, 0), (-1, 0), (0, 1), (0, -1)]
        .into_iter()
        .find(|(dx, dy)| {
            session
                .dungeon()
                .and_then(|d| d.tile(start.offset(*dx, *dy)))
                .is_some_and(|t| !t.blocks_movement())
        });

    match step {
        Some((dx, dy)) => {
            session.attempt_move(dx, dy);
            let pos = session.player_pos();
            let dungeon = session.dungeon().expect("level");

            let mut revealed_outside = 0;
            let mut dark_inside = 0;
            for y in 0..dungeon.height {
                for x in 0..dungeon.width {
                    let inside =
                        (x - pos.x).abs() <= 2 && (y - pos.y).abs() <= 2;
                    let seen = dungeon.discovered[y as usize][x as usize];
                    if seen && !inside {
                        revealed_outside += 1;
                    }
                    if !seen && inside {
                        dark_inside += 1;
                    }
                }
            }
            check(
                &mut results,
                "discovery: move reveals exactly the 5x5 block",
                revealed_outside == 0 && dark_inside == 0,
                format!("{revealed_outside} stray, {dark_inside} missing around {pos:?}"),
            );
        }
        None => check(
            &mut results,
            "discovery: move reveals exactly the 5x5 block",
            false,
            "start position had no open neighbour",
        ),
    }

    results
}

fn validate_end_to_end(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(1337);

    // Depth-1 scenario from a fixed layout: strength-5 enemy, strength-10
    // player, one exchange of blows.
    let mut world = hecs::World::new();
    let mut enemy_stats = Stats::enemy(1, false);
    enemy_stats.strength = 5;
    let enemy = world.spawn((
        Kind::Enemy { elite: false },
        Name::new("Ash Walker"),
        GridPos::new(6, 5),
        enemy_stats,
    ));

    let mut player = Stats::player();
    let mut log = MessageLog::new();
    let mut effects = CombatEffects::default();

    player_strike(
        &mut world, enemy, &mut player, &mut log, &mut effects, &mut rng,
    );
    let enemy_hp = world.get::<&Stats>(enemy).map(|s| s.hp).unwrap_or(-1);
    let removed = enemy_stats.hp - enemy_hp;
    check(
        &mut results,
        "end-to-end: player strike removes 10-15 hp",
        (10..=15).contains(&removed),
        format!("removed {removed}"),
    );
    check(
        &mut results,
        "end-to-end: strike grants ember",
        player.ember == 5,
        format!("ember {}", player.ember),
    );

    monster_strike(
        &world,
        enemy,
        &mut player,
        GridPos::new(5, 5),
        &mut log,
        &mut effects,
        &mut rng,
    );
    check(
        &mut results,
        "end-to-end: counter-attack leaves hp in [94, 96]",
        (94..=96).contains(&player.hp),
        format!("player hp {}", player.hp),
    );

    if verbose {
        for message in log.iter() {
            println!("  log[{:?}] {}", message.kind, message.text);
        }
    }

    // A full session survives a burst of simulated time without panicking
    // and keeps its phase machine consistent.
    let mut session = GameSession::new();
    session.start();
    for _ in 0..600 {
        session.update(0.05); // 30 simulated seconds
    }
    let phase_ok = matches!(session.phase(), GamePhase::Playing | GamePhase::GameOver);
    check(
        &mut results,
        "end-to-end: 30s simulated session stays consistent",
        phase_ok,
        format!("phase {:?}, depth {}", session.phase(), session.depth()),
    );

    if verbose {
        let snapshot = serde_json::to_string(&session.entities()).unwrap_or_default();
        println!("  entity snapshot: {snapshot}");
    }

    results
}

fn validate_resource_caps(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut player = Stats::player();
    for _ in 0..10_000 {
        player.gain_ember(5);
        player.regen_stamina(1);
    }
    check(
        &mut results,
        "caps: ember and stamina never exceed maxima",
        player.ember == player.max_ember && player.stamina == player.max_stamina,
        format!("ember {}/{}", player.ember, player.max_ember),
    );

    results
}
