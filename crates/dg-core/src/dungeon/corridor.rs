//! Corridor carving
//!
//! Three passes, all purely additive (only Empty cells become Floor):
//! 1. Join rooms in list order, then a few extra random room pairs
//! 2. Join random far-apart floor cells to create loops
//! 3. Widen pinch points around sparsely connected floor cells
//!
//! Every carved cell is recorded so later stages can tell corridor floor
//! from room floor.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{DistanceMetric, GenConfig};
use crate::rng::GameRng;

use super::grid::{band_offsets, Pos};
use super::{CellKind, Grid, Room};

/// Draws allowed when looking for a far-apart floor pair
pub const EXTRA_PAIR_ATTEMPTS: usize = 20;

/// Pinch-point threshold for the widening pass
pub const WIDEN_MAX_FLOOR_NEIGHBORS: usize = 3;

/// Cells carved by corridor operations, in carving order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Pos>", into = "Vec<Pos>")]
pub struct CorridorCells {
    cells: Vec<Pos>,
    lookup: HashSet<Pos>,
}

impl From<Vec<Pos>> for CorridorCells {
    fn from(cells: Vec<Pos>) -> Self {
        let mut out = Self::new();
        for pos in cells {
            out.push(pos);
        }
        out
    }
}

impl From<CorridorCells> for Vec<Pos> {
    fn from(cells: CorridorCells) -> Self {
        cells.cells
    }
}

impl PartialEq for CorridorCells {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for CorridorCells {}

impl CorridorCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a carved cell; repeated positions are ignored
    pub fn push(&mut self, pos: Pos) {
        if self.lookup.insert(pos) {
            self.cells.push(pos);
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.lookup.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pos> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[Pos] {
        &self.cells
    }
}

/// Carve Floor into an Empty interior cell and record it
fn carve_cell(grid: &mut Grid, x: i32, y: i32, carved: &mut CorridorCells) {
    if grid.in_interior(x, y) && grid.get(x, y) == Some(CellKind::Empty) {
        grid.set(x, y, CellKind::Floor);
        carved.push((x as usize, y as usize));
    }
}

/// Stamp a band of `width` cells across `(px, py)` centered on `(x, y)`
fn carve_band(
    grid: &mut Grid,
    (x, y): (i32, i32),
    (px, py): (i32, i32),
    width: usize,
    carved: &mut CorridorCells,
) {
    for offset in band_offsets(width) {
        carve_cell(grid, x + px * offset, y + py * offset, carved);
    }
}

/// Carve an L-shaped corridor of the given width between two points
///
/// With `horizontal_first` the path runs along `from`'s row, then along
/// `to`'s column; otherwise the other way round.
pub fn carve_l_corridor(
    grid: &mut Grid,
    from: Pos,
    to: Pos,
    width: usize,
    horizontal_first: bool,
    carved: &mut CorridorCells,
) {
    let (x1, y1) = (from.0 as i32, from.1 as i32);
    let (x2, y2) = (to.0 as i32, to.1 as i32);

    if horizontal_first {
        carve_horizontal(grid, x1, x2, y1, width, carved);
        carve_vertical(grid, y1, y2, x2, width, carved);
    } else {
        carve_vertical(grid, y1, y2, x1, width, carved);
        carve_horizontal(grid, x1, x2, y2, width, carved);
    }
}

fn carve_horizontal(
    grid: &mut Grid,
    x1: i32,
    x2: i32,
    y: i32,
    width: usize,
    carved: &mut CorridorCells,
) {
    let step = (x2 - x1).signum();
    let mut x = x1;
    loop {
        carve_band(grid, (x, y), (0, 1), width, carved);
        if x == x2 {
            break;
        }
        x += step;
    }
}

fn carve_vertical(
    grid: &mut Grid,
    y1: i32,
    y2: i32,
    x: i32,
    width: usize,
    carved: &mut CorridorCells,
) {
    let step = (y2 - y1).signum();
    let mut y = y1;
    loop {
        carve_band(grid, (x, y), (1, 0), width, carved);
        if y == y2 {
            break;
        }
        y += step;
    }
}

/// Join two points with a randomly oriented corridor of random width
fn join_points(
    grid: &mut Grid,
    from: Pos,
    to: Pos,
    config: &GenConfig,
    rng: &mut GameRng,
    carved: &mut CorridorCells,
) {
    let width = config.corridor_width.sample(rng);
    let horizontal_first = rng.one_in(2);
    trace!(?from, ?to, width, horizontal_first, "carving corridor");
    carve_l_corridor(grid, from, to, width, horizontal_first, carved);
}

/// Join rooms in list order, then `extra_room_connections` random pairs
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &[Room],
    config: &GenConfig,
    rng: &mut GameRng,
    carved: &mut CorridorCells,
) {
    if rooms.len() < 2 {
        return;
    }

    for pair in rooms.windows(2) {
        join_points(grid, pair[0].center(), pair[1].center(), config, rng, carved);
    }

    // Extra pairs skip each room's successor, already joined above
    if rooms.len() > 2 {
        for _ in 0..config.extra_room_connections {
            let a = rng.index(rooms.len());
            let mut b = rng.index(rooms.len() - 2);
            if b >= a {
                b += 2;
            }
            if b < rooms.len() {
                join_points(grid, rooms[a].center(), rooms[b].center(), config, rng, carved);
            }
        }
    }
}

/// Join `extra_corridors` random floor pairs lying far enough apart
pub fn carve_extra_corridors(
    grid: &mut Grid,
    config: &GenConfig,
    rng: &mut GameRng,
    carved: &mut CorridorCells,
) {
    let floor = grid.positions_where(|k| k.is_floor_like());
    if floor.len() < 2 {
        return;
    }

    let mut joined = 0;
    for _ in 0..config.extra_corridors {
        for _ in 0..EXTRA_PAIR_ATTEMPTS {
            let a = floor[rng.index(floor.len())];
            let b = floor[rng.index(floor.len())];
            if a != b
                && DistanceMetric::Euclidean.distance(a, b) >= config.extra_corridor_min_distance
            {
                join_points(grid, a, b, config, rng, carved);
                joined += 1;
                break;
            }
        }
    }
    debug!(joined, requested = config.extra_corridors, "extra corridors carved");
}

/// Open up cells around floor with few floor neighbours
///
/// Pinch points are selected before anything is carved, so cells opened
/// here neither get revisited nor change which cells qualify.
pub fn widen_corridors(
    grid: &mut Grid,
    config: &GenConfig,
    rng: &mut GameRng,
    carved: &mut CorridorCells,
) {
    // nothing was carved, so there is no corridor to widen
    if config.widen_chance == 0 || carved.is_empty() {
        return;
    }
    let before = carved.len();
    let pinch_points: Vec<Pos> = grid
        .positions_where(|k| k.is_floor_like())
        .into_iter()
        .filter(|&p| grid.floor_like_neighbors(p) <= WIDEN_MAX_FLOOR_NEIGHBORS)
        .collect();

    for pos in pinch_points {
        let empties: Vec<Pos> = grid
            .neighbors8(pos)
            .filter(|&p| grid.kind(p).is_empty())
            .collect();
        for (x, y) in empties {
            if rng.percent(config.widen_chance) {
                carve_cell(grid, x as i32, y as i32, carved);
            }
        }
    }
    debug!(widened = carved.len() - before, "corridors widened");
}

/// Run every corridor pass and return the carved cell set
pub fn carve_corridors(
    grid: &mut Grid,
    rooms: &[Room],
    config: &GenConfig,
    rng: &mut GameRng,
) -> CorridorCells {
    let mut carved = CorridorCells::new();
    connect_rooms(grid, rooms, config, rng, &mut carved);
    carve_extra_corridors(grid, config, rng, &mut carved);
    widen_corridors(grid, config, rng, &mut carved);
    debug!(cells = carved.len(), "corridor carving done");
    carved
}
