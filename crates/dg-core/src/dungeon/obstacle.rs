//! Rock and chest scattering
//!
//! Rocks are kept apart from each other and off cells that would cut a
//! passage. Chests go to dead-end tips first, then anywhere with room to
//! approach them. With `obstacle_overlay` rocks live in a side layer on top
//! of Floor; otherwise they replace the cell kind. Both modes share the same
//! rock set, so adjacency checks do not care which mode is active.

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::config::GenConfig;
use crate::rng::GameRng;

use super::corridor::CorridorCells;
use super::dead_end::DeadEndBranch;
use super::grid::Pos;
use super::room::in_any_room;
use super::{CellKind, Grid, Room};

/// Walkable neighbours a rock in a corridor must keep
pub const CORRIDOR_ROCK_MIN_NEIGHBORS: usize = 3;

/// Walkable neighbours any other rock or chest must keep
pub const MIN_WALKABLE_NEIGHBORS: usize = 2;

/// Rocks and chests placed during one run
#[derive(Debug, Clone, Default)]
pub struct Obstacles {
    overlay: bool,
    rocks: HashSet<Pos>,
    chests: Vec<Pos>,
}

impl Obstacles {
    pub fn new(overlay: bool) -> Self {
        Self {
            overlay,
            ..Self::default()
        }
    }

    pub fn is_overlay(&self) -> bool {
        self.overlay
    }

    pub fn is_rock(&self, pos: Pos) -> bool {
        self.rocks.contains(&pos)
    }

    /// Floor-like and not covered by a rock
    pub fn is_walkable(&self, grid: &Grid, pos: Pos) -> bool {
        grid.kind(pos).is_floor_like() && !self.is_rock(pos)
    }

    pub fn walkable_neighbors(&self, grid: &Grid, pos: Pos) -> usize {
        grid.neighbors8(pos)
            .filter(|&p| self.is_walkable(grid, p))
            .count()
    }

    fn rock_nearby(&self, grid: &Grid, pos: Pos) -> bool {
        grid.neighbors8(pos).any(|p| self.is_rock(p))
    }

    fn add_rock(&mut self, grid: &mut Grid, pos: Pos) {
        self.rocks.insert(pos);
        if !self.overlay {
            grid.set_pos(pos, CellKind::Rock);
        }
    }

    fn remove_rock(&mut self, grid: &mut Grid, pos: Pos) {
        if self.rocks.remove(&pos) && !self.overlay {
            grid.set_pos(pos, CellKind::Floor);
        }
    }

    fn add_chest(&mut self, grid: &mut Grid, pos: Pos) {
        grid.set_pos(pos, CellKind::Chest);
        self.chests.push(pos);
    }

    pub fn rock_count(&self) -> usize {
        self.rocks.len()
    }

    /// Rock positions in scan order
    pub fn rocks(&self) -> Vec<Pos> {
        let mut rocks: Vec<Pos> = self.rocks.iter().copied().collect();
        rocks.sort_unstable_by_key(|&(x, y)| (y, x));
        rocks
    }

    /// Chest positions in placement order
    pub fn chests(&self) -> &[Pos] {
        &self.chests
    }
}

/// Check whether a rock may go at `pos`
fn rock_fits(
    grid: &Grid,
    obstacles: &Obstacles,
    rooms: &[Room],
    corridor: &CorridorCells,
    pos: Pos,
) -> bool {
    if !grid.kind(pos).accepts_obstacle() || obstacles.is_rock(pos) {
        return false;
    }
    if obstacles.rock_nearby(grid, pos) {
        return false;
    }
    let needed = if corridor.contains(pos) && !in_any_room(rooms, pos.0, pos.1) {
        CORRIDOR_ROCK_MIN_NEIGHBORS
    } else {
        MIN_WALKABLE_NEIGHBORS
    };
    obstacles.walkable_neighbors(grid, pos) >= needed
}

/// Check whether a chest may go at `pos`
fn chest_fits(grid: &Grid, obstacles: &Obstacles, pos: Pos) -> bool {
    grid.kind(pos).accepts_obstacle()
        && !obstacles.is_rock(pos)
        && obstacles.walkable_neighbors(grid, pos) >= MIN_WALKABLE_NEIGHBORS
}

/// Scatter rocks on random floor cells; returns how many were placed
pub fn scatter_rocks(
    grid: &mut Grid,
    obstacles: &mut Obstacles,
    rooms: &[Room],
    corridor: &CorridorCells,
    config: &GenConfig,
    rng: &mut GameRng,
) -> usize {
    let target = config.rock_count.sample(rng);
    let floor = grid.positions_where(|k| k.accepts_obstacle());
    if floor.is_empty() || target == 0 {
        return 0;
    }

    let mut placed = 0;
    for _ in 0..target.saturating_mul(config.obstacle_attempts) {
        if placed >= target {
            break;
        }
        let pos = floor[rng.index(floor.len())];
        if rock_fits(grid, obstacles, rooms, corridor, pos) {
            obstacles.add_rock(grid, pos);
            placed += 1;
        } else {
            trace!(?pos, "rock rejected");
        }
    }
    debug!(placed, target, "rocks scattered");
    placed
}

/// Put chests on dead-end tips, then scatter the rest; returns how many were placed
pub fn place_chests(
    grid: &mut Grid,
    obstacles: &mut Obstacles,
    dead_ends: &[DeadEndBranch],
    config: &GenConfig,
    rng: &mut GameRng,
) -> usize {
    let target = config.chest_count.sample(rng);
    let mut placed = 0;

    for tip in dead_ends.iter().filter_map(DeadEndBranch::tip) {
        if placed >= target {
            break;
        }
        if grid.kind(tip) == CellKind::DeadEnd
            && !obstacles.is_rock(tip)
            && obstacles.walkable_neighbors(grid, tip) >= MIN_WALKABLE_NEIGHBORS
        {
            obstacles.add_chest(grid, tip);
            placed += 1;
        }
    }
    let on_tips = placed;

    let floor = grid.positions_where(|k| k.accepts_obstacle());
    if !floor.is_empty() {
        for _ in 0..(target - placed).saturating_mul(config.obstacle_attempts) {
            if placed >= target {
                break;
            }
            let pos = floor[rng.index(floor.len())];
            if chest_fits(grid, obstacles, pos) {
                obstacles.add_chest(grid, pos);
                placed += 1;
            }
        }
    }
    debug!(placed, on_tips, target, "chests placed");
    placed
}

/// Remove random rocks from rooms holding more than their share
///
/// A room keeps at most `max(1, area * density)` rocks.
pub fn cap_room_density(
    grid: &mut Grid,
    obstacles: &mut Obstacles,
    rooms: &[Room],
    density: f64,
    rng: &mut GameRng,
) -> usize {
    let mut removed = 0;
    for room in rooms {
        let mut inside: Vec<Pos> = room.cells().filter(|&p| obstacles.is_rock(p)).collect();
        let limit = ((room.area() as f64 * density).floor() as usize).max(1);
        if inside.len() <= limit {
            continue;
        }
        rng.shuffle(&mut inside);
        for &pos in &inside[limit..] {
            obstacles.remove_rock(grid, pos);
            removed += 1;
        }
    }
    if removed > 0 {
        debug!(removed, "rocks thinned out of crowded rooms");
    }
    removed
}

/// Run rock scattering, chest placement and the per-room rock cap
pub fn place_obstacles(
    grid: &mut Grid,
    rooms: &[Room],
    corridor: &CorridorCells,
    dead_ends: &[DeadEndBranch],
    config: &GenConfig,
    rng: &mut GameRng,
) -> Obstacles {
    let mut obstacles = Obstacles::new(config.obstacle_overlay);
    scatter_rocks(grid, &mut obstacles, rooms, corridor, config, rng);
    place_chests(grid, &mut obstacles, dead_ends, config, rng);
    if let Some(density) = config.room_rock_density {
        cap_room_density(grid, &mut obstacles, rooms, density, rng);
    }
    obstacles
}
