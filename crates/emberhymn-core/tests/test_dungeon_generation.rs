//! Generator invariants that must hold for every depth.

use emberhymn_core::components::{Dead, GridPos, Kind, Name, Stats, Theme, TileKind};
use emberhymn_core::generation::generate_dungeon;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn every_level_has_one_start_and_one_exit() {
    for depth in 1..=8 {
        let mut rng = StdRng::seed_from_u64(depth as u64 * 131);
        let dungeon = generate_dungeon(depth, &mut rng);

        let mut safe_zones = 0;
        let mut doors = 0;
        for row in &dungeon.tiles {
            for tile in row {
                match tile {
                    TileKind::SafeZone => safe_zones += 1,
                    TileKind::Door => doors += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(safe_zones, 1, "depth {depth}");
        assert_eq!(doors, 1, "depth {depth}");
        assert_eq!(dungeon.tile(dungeon.start), Some(TileKind::SafeZone));
        assert_eq!(dungeon.tile(dungeon.exit), Some(TileKind::Door));
    }
}

#[test]
fn entities_spawn_alive_on_open_tiles() {
    for depth in 1..=5 {
        let mut rng = StdRng::seed_from_u64(depth as u64 * 977);
        let dungeon = generate_dungeon(depth, &mut rng);

        for (_, (pos, dead)) in dungeon
            .world
            .query::<(&GridPos, Option<&Dead>)>()
            .iter()
        {
            assert!(dead.is_none());
            assert!(dungeon.in_bounds(*pos));
            assert!(!dungeon.blocks(*pos), "entity inside a wall at {pos:?}");
        }
    }
}

#[test]
fn exactly_one_boss_per_level_with_themed_name() {
    for depth in 1..=6 {
        let mut rng = StdRng::seed_from_u64(depth as u64 * 53);
        let dungeon = generate_dungeon(depth, &mut rng);

        let bosses: Vec<String> = dungeon
            .world
            .query::<(&Kind, &Name)>()
            .iter()
            .filter(|(_, (kind, _))| kind.is_boss())
            .map(|(_, (_, name))| name.0.clone())
            .collect();

        assert_eq!(bosses.len(), 1, "depth {depth}");
        assert_eq!(bosses[0], Theme::for_depth(depth).config().boss_name);
    }
}

#[test]
fn boss_stats_strictly_increase_with_depth() {
    let mut previous: Option<Stats> = None;
    for depth in 1..=10 {
        let mut rng = StdRng::seed_from_u64(depth as u64);
        let dungeon = generate_dungeon(depth, &mut rng);

        let boss_stats = dungeon
            .world
            .query::<(&Kind, &Stats)>()
            .iter()
            .find(|(_, (kind, _))| kind.is_boss())
            .map(|(_, (_, stats))| *stats)
            .expect("level must hold a boss");

        if let Some(prev) = previous {
            assert!(boss_stats.max_hp > prev.max_hp);
            assert!(boss_stats.strength > prev.strength);
        }
        previous = Some(boss_stats);
    }
}

#[test]
fn boss_guards_the_exit() {
    let mut rng = StdRng::seed_from_u64(404);
    let dungeon = generate_dungeon(3, &mut rng);

    let boss_pos = dungeon
        .world
        .query::<(&Kind, &GridPos)>()
        .iter()
        .find(|(_, (kind, _))| kind.is_boss())
        .map(|(_, (_, pos))| *pos)
        .expect("level must hold a boss");

    assert_eq!(boss_pos, GridPos::new(dungeon.exit.x - 1, dungeon.exit.y));
}

#[test]
fn discovery_starts_fully_dark() {
    let mut rng = StdRng::seed_from_u64(2);
    let dungeon = generate_dungeon(1, &mut rng);
    assert!(dungeon
        .discovered
        .iter()
        .all(|row| row.iter().all(|seen| !seen)));
    assert_eq!(dungeon.discovered.len(), dungeon.tiles.len());
    assert_eq!(dungeon.discovered[0].len(), dungeon.tiles[0].len());
}
