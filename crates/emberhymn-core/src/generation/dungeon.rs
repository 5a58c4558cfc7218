//! Dungeon generation - carves a connected room-and-corridor layout and
//! populates it for a given depth.
//!
//! The generator never fails: room and entity placements that keep
//! colliding are silently dropped, so the worst case is a sparser level
//! than requested, never an untraversable one.

use hecs::World;
use log::debug;
use rand::Rng;

use crate::components::{Dungeon, GridPos, Kind, Name, Stats, Theme, TileKind};
use crate::constants::map;

/// Axis-aligned room rectangle in tile coordinates.
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    fn center(&self) -> GridPos {
        GridPos::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Axis-aligned overlap test, no padding.
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Build a level for the given 1-based depth. Structure is always a
/// traversable path of rooms; placement is randomized.
pub fn generate_dungeon(depth: u32, rng: &mut impl Rng) -> Dungeon {
    let width = map::WIDTH;
    let height = map::HEIGHT;
    let mut tiles = vec![vec![TileKind::Wall; width as usize]; height as usize];

    let rooms = place_rooms(&mut tiles, width, height, rng);
    carve_corridors(&mut tiles, &rooms);

    let theme = Theme::for_depth(depth);

    // Start and exit sit at the first and last room centers. Forcing the
    // tiles after corridor carving keeps each unique on the grid.
    let start = rooms[0].center();
    let exit = rooms[rooms.len() - 1].center();
    tiles[start.y as usize][start.x as usize] = TileKind::SafeZone;
    tiles[exit.y as usize][exit.x as usize] = TileKind::Door;

    let mut world = World::new();
    populate(&mut world, &tiles, &rooms, exit, depth, theme, rng);

    let monsters = world.len();
    debug!(
        "generated depth {depth}: {} rooms, {monsters} entities, theme {:?}",
        rooms.len(),
        theme
    );

    let discovered = vec![vec![false; width as usize]; height as usize];

    Dungeon {
        depth,
        theme,
        tiles,
        world,
        start,
        exit,
        width,
        height,
        discovered,
    }
}

/// Place 8-12 rooms by rejection sampling and carve their interiors to
/// floor. A candidate overlapping any accepted room is discarded, not
/// retried, so fewer rooms than attempted is normal.
fn place_rooms(
    tiles: &mut [Vec<TileKind>],
    width: i32,
    height: i32,
    rng: &mut impl Rng,
) -> Vec<Rect> {
    let attempts = rng.gen_range(map::MIN_ROOM_ATTEMPTS..=map::MAX_ROOM_ATTEMPTS);
    let mut rooms: Vec<Rect> = Vec::with_capacity(attempts as usize);

    for _ in 0..attempts {
        let w = rng.gen_range(map::ROOM_MIN_SIZE..=map::ROOM_MAX_SIZE);
        let h = rng.gen_range(map::ROOM_MIN_SIZE..=map::ROOM_MAX_SIZE);
        // Keep a one-tile wall border around the grid edge.
        let x = rng.gen_range(1..width - w - 1);
        let y = rng.gen_range(1..height - h - 1);
        let candidate = Rect { x, y, w, h };

        if rooms.iter().any(|r| candidate.intersects(r)) {
            continue;
        }

        for ty in y..y + h {
            for tx in x..x + w {
                tiles[ty as usize][tx as usize] = TileKind::Floor;
            }
        }
        rooms.push(candidate);
    }

    rooms
}

/// Connect consecutive rooms (in placement order) with L-shaped corridors:
/// a horizontal strip at the first center's row, then a vertical strip at
/// the second center's column. This links the rooms as a path.
fn carve_corridors(tiles: &mut [Vec<TileKind>], rooms: &[Rect]) {
    for pair in rooms.windows(2) {
        let c1 = pair[0].center();
        let c2 = pair[1].center();

        for x in c1.x.min(c2.x)..=c1.x.max(c2.x) {
            tiles[c1.y as usize][x as usize] = TileKind::Floor;
        }
        for y in c1.y.min(c2.y)..=c1.y.max(c2.y) {
            tiles[y as usize][c2.x as usize] = TileKind::Floor;
        }
    }
}

/// Spawn the level's inhabitants. The first room stays empty, the last
/// holds the boss beside the exit, and every room in between rolls 1-2
/// enemies plus a chance of a chest. Samples that land on non-floor tiles
/// are skipped without retry.
fn populate(
    world: &mut World,
    tiles: &[Vec<TileKind>],
    rooms: &[Rect],
    exit: GridPos,
    depth: u32,
    theme: Theme,
    rng: &mut impl Rng,
) {
    for (index, room) in rooms.iter().enumerate() {
        if index == 0 {
            continue;
        }

        if index == rooms.len() - 1 {
            world.spawn((
                Kind::Boss { phase: 1 },
                Name::new(theme.config().boss_name),
                GridPos::new(exit.x - 1, exit.y),
                Stats::boss(depth),
            ));
            continue;
        }

        let enemy_count = rng.gen_range(1..=2);
        for _ in 0..enemy_count {
            let pos = GridPos::new(
                rng.gen_range(room.x + 1..room.x + room.w - 1),
                rng.gen_range(room.y + 1..room.y + room.h - 1),
            );
            if tiles[pos.y as usize][pos.x as usize] != TileKind::Floor {
                continue;
            }

            let elite = rng.gen::<f32>() < map::ELITE_CHANCE;
            let name = if elite { "Elite Cinderguard" } else { "Ash Walker" };
            world.spawn((
                Kind::Enemy { elite },
                Name::new(name),
                pos,
                Stats::enemy(depth, elite),
            ));
        }

        if rng.gen::<f32>() < map::CHEST_CHANCE {
            let pos = GridPos::new(
                rng.gen_range(room.x..room.x + room.w),
                rng.gen_range(room.y..room.y + room.h),
            );
            if tiles[pos.y as usize][pos.x as usize] == TileKind::Floor {
                world.spawn((Kind::Chest, Name::new("Ancient Cache"), pos, Stats::inert()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rect_overlap() {
        let a = Rect { x: 2, y: 2, w: 5, h: 5 };
        let b = Rect { x: 6, y: 6, w: 3, h: 3 };
        let c = Rect { x: 7, y: 2, w: 3, h: 3 };
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        // Edge-adjacent rectangles do not overlap.
        let d = Rect { x: 9, y: 6, w: 3, h: 3 };
        assert!(!b.intersects(&d));
    }

    #[test]
    fn test_placed_room_interiors_are_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tiles =
            vec![vec![TileKind::Wall; map::WIDTH as usize]; map::HEIGHT as usize];
        let rooms = place_rooms(&mut tiles, map::WIDTH, map::HEIGHT, &mut rng);

        assert!(!rooms.is_empty());
        for room in &rooms {
            for y in room.y..room.y + room.h {
                for x in room.x..room.x + room.w {
                    assert_eq!(tiles[y as usize][x as usize], TileKind::Floor);
                }
            }
        }
    }

    #[test]
    fn test_rooms_keep_border_walls() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tiles =
                vec![vec![TileKind::Wall; map::WIDTH as usize]; map::HEIGHT as usize];
            let rooms = place_rooms(&mut tiles, map::WIDTH, map::HEIGHT, &mut rng);
            for room in &rooms {
                assert!(room.x >= 1 && room.y >= 1);
                assert!(room.x + room.w < map::WIDTH);
                assert!(room.y + room.h < map::HEIGHT);
            }
        }
    }

    #[test]
    fn test_corridors_connect_consecutive_centers() {
        let rooms = [
            Rect { x: 2, y: 2, w: 4, h: 4 },
            Rect { x: 20, y: 20, w: 4, h: 4 },
        ];
        let mut tiles = vec![vec![TileKind::Wall; 40]; 40];
        carve_corridors(&mut tiles, &rooms);

        let c1 = rooms[0].center();
        let c2 = rooms[1].center();
        // Horizontal leg at the first room's row, vertical at the second's
        // column; the elbow tile belongs to both.
        assert_eq!(tiles[c1.y as usize][c2.x as usize], TileKind::Floor);
        for x in c1.x..=c2.x {
            assert_eq!(tiles[c1.y as usize][x as usize], TileKind::Floor);
        }
        for y in c1.y..=c2.y {
            assert_eq!(tiles[y as usize][c2.x as usize], TileKind::Floor);
        }
    }
}
