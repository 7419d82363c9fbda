//! Dungeon generation pipeline
//!
//! Runs the stages in order on a fresh grid: rooms, corridors, dead ends,
//! landmarks, obstacles, walls. Nothing is kept between calls, so separate
//! threads may generate concurrently as long as each owns its `GameRng`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GenConfig;
use crate::error::ConfigurationError;
use crate::rng::GameRng;

use super::corridor::{carve_corridors, CorridorCells};
use super::dead_end::{grow_dead_ends, DeadEndBranch};
use super::grid::Pos;
use super::landmark::place_landmarks;
use super::obstacle::place_obstacles;
use super::room_placer::place_rooms;
use super::wall::build_walls;
use super::{CellKind, Grid, Room};

/// Counts gathered over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub rooms_requested: usize,
    pub rooms_placed: usize,
    pub corridor_cells: usize,
    pub dead_ends: usize,
    pub rocks: usize,
    pub chests: usize,
    pub walls: usize,
    /// Floor-like cells in the finished grid
    pub walkable_cells: usize,
}

/// Finished dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub corridor_cells: CorridorCells,
    pub spawn: Option<Pos>,
    pub exit: Option<Pos>,
    pub dead_ends: Vec<DeadEndBranch>,
    /// Rock positions in scan order
    pub rocks: Vec<Pos>,
    /// Chest positions in placement order
    pub chests: Vec<Pos>,
    /// Rocks sit on top of Floor instead of replacing it
    pub obstacle_overlay: bool,
    pub seed: u64,
    pub stats: GenerationStats,
}

impl GenerationResult {
    pub fn is_rock(&self, pos: Pos) -> bool {
        self.rocks.contains(&pos)
    }

    /// Floor-like and not blocked by a rock in either obstacle mode
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.grid.kind(pos).is_floor_like() && !(self.obstacle_overlay && self.is_rock(pos))
    }

    /// Glyph dump with overlay rocks drawn over their floor
    pub fn to_text(&self) -> String {
        let width = self.grid.width();
        let mut out = String::with_capacity((width + 1) * self.grid.height());
        for y in 0..self.grid.height() {
            for x in 0..width {
                let glyph = if self.obstacle_overlay && self.is_rock((x, y)) {
                    CellKind::Rock.symbol()
                } else {
                    self.grid.kind((x, y)).symbol()
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    /// One-line description of the run
    pub fn summary(&self) -> String {
        let s = &self.stats;
        format!(
            "seed {}: {}x{}, {}/{} rooms, {} corridor cells, {} dead ends, {} rocks, {} chests, spawn {}, exit {}",
            self.seed,
            self.grid.width(),
            self.grid.height(),
            s.rooms_placed,
            s.rooms_requested,
            s.corridor_cells,
            s.dead_ends,
            s.rocks,
            s.chests,
            format_pos(self.spawn),
            format_pos(self.exit),
        )
    }
}

fn format_pos(pos: Option<Pos>) -> String {
    match pos {
        Some((x, y)) => format!("({x}, {y})"),
        None => "none".to_string(),
    }
}

/// Generate a dungeon from `config`, drawing every random choice from `rng`
///
/// The only error is an invalid config. Running out of space yields fewer
/// rooms, branches or obstacles instead.
pub fn generate(
    config: &GenConfig,
    rng: &mut GameRng,
) -> Result<GenerationResult, ConfigurationError> {
    config.validate()?;

    let (width, height) = config.grid_dimensions();
    let mut grid = Grid::new(width, height);

    let rooms = place_rooms(&mut grid, config, rng);
    let corridor_cells = carve_corridors(&mut grid, &rooms, config, rng);
    let dead_ends = grow_dead_ends(&mut grid, &corridor_cells, config, rng);
    let landmarks = place_landmarks(&mut grid, &rooms, &corridor_cells, config, rng);
    let obstacles = place_obstacles(&mut grid, &rooms, &corridor_cells, &dead_ends, config, rng);
    let walls = build_walls(&mut grid);

    let rocks = obstacles.rocks();
    let chests = obstacles.chests().to_vec();
    let walkable_cells = grid.positions().filter(|&p| grid.kind(p).is_floor_like()).count();
    let stats = GenerationStats {
        rooms_requested: config.room_count,
        rooms_placed: rooms.len(),
        corridor_cells: corridor_cells.len(),
        dead_ends: dead_ends.len(),
        rocks: rocks.len(),
        chests: chests.len(),
        walls,
        walkable_cells,
    };

    info!(
        seed = rng.seed(),
        width,
        height,
        rooms = stats.rooms_placed,
        corridor_cells = stats.corridor_cells,
        dead_ends = stats.dead_ends,
        rocks = stats.rocks,
        chests = stats.chests,
        spawn = ?landmarks.spawn,
        exit = ?landmarks.exit,
        "dungeon generated"
    );

    Ok(GenerationResult {
        grid,
        rooms,
        corridor_cells,
        spawn: landmarks.spawn,
        exit: landmarks.exit,
        dead_ends,
        rocks,
        chests,
        obstacle_overlay: obstacles.is_overlay(),
        seed: rng.seed(),
        stats,
    })
}

/// Generate with a fresh RNG seeded from `seed`
pub fn generate_with_seed(
    config: &GenConfig,
    seed: u64,
) -> Result<GenerationResult, ConfigurationError> {
    generate(config, &mut GameRng::new(seed))
}
