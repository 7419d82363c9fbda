//! Dead-end branch growth
//!
//! Branches sprout from corridor floor (or any floor when no corridor cell
//! qualifies) into clear rock. A direction qualifies only when a lookahead
//! along it finds empty space with no floor on either side, and a branch
//! that runs into unrelated floor past its first step is discarded whole.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::GenConfig;
use crate::rng::GameRng;

use super::corridor::CorridorCells;
use super::grid::{band_offsets, Direction, DirectionSet, Pos};
use super::{CellKind, Grid};

/// Fewest cells a branch needs to be kept
pub const MIN_BRANCH_CELLS: usize = 3;

/// One grown branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadEndBranch {
    /// Existing floor cell the branch grew from (not part of `cells`)
    pub root: Pos,
    pub direction: Direction,
    pub width: usize,
    /// Cells in growth order; each step ends with its center-line cell
    pub cells: Vec<Pos>,
}

impl DeadEndBranch {
    /// Far end of the branch, the preferred chest spot
    pub fn tip(&self) -> Option<Pos> {
        self.cells.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn offset(pos: Pos, (dx, dy): (i32, i32), distance: i32) -> (i32, i32) {
    (pos.0 as i32 + dx * distance, pos.1 as i32 + dy * distance)
}

/// Check that `lookahead` cells along `dir` are clear enough to grow into
///
/// Each center-line cell must be an Empty interior cell, and neither cell
/// beside it may be floor-like.
pub fn can_grow_in_direction(grid: &Grid, pos: Pos, dir: Direction, lookahead: usize) -> bool {
    let (px, py) = dir.perpendicular();
    for distance in 1..=lookahead.max(1) as i32 {
        let (cx, cy) = offset(pos, dir.delta(), distance);
        if !grid.in_interior(cx, cy) || grid.get(cx, cy) != Some(CellKind::Empty) {
            return false;
        }
        for side in [-1, 1] {
            if grid
                .get(cx + px * side, cy + py * side)
                .is_some_and(|k| k.is_floor_like())
            {
                return false;
            }
        }
    }
    true
}

/// Directions a branch could grow in from `pos`
pub fn growable_directions(grid: &Grid, pos: Pos, lookahead: usize) -> DirectionSet {
    Direction::ALL
        .into_iter()
        .filter(|&d| can_grow_in_direction(grid, pos, d, lookahead))
        .fold(DirectionSet::empty(), |set, d| set | d.flag())
}

/// Floor cells able to host a branch: corridor cells first, any floor otherwise
fn growth_candidates(
    grid: &Grid,
    corridor: &CorridorCells,
    lookahead: usize,
) -> Vec<(Pos, DirectionSet)> {
    let qualify = |pos: Pos| {
        if grid.kind(pos) != CellKind::Floor {
            return None;
        }
        let dirs = growable_directions(grid, pos, lookahead);
        (!dirs.is_empty()).then_some((pos, dirs))
    };

    let from_corridors: Vec<_> = corridor.iter().filter_map(|&p| qualify(p)).collect();
    if !from_corridors.is_empty() {
        return from_corridors;
    }
    grid.positions_where(|k| k == CellKind::Floor)
        .into_iter()
        .filter_map(qualify)
        .collect()
}

/// Trace out a branch without touching the grid
///
/// Returns `None` if the branch collides with non-empty cells past its first
/// step or ends up too short. Leaving the interior just stops growth.
pub fn grow_branch(
    grid: &Grid,
    root: Pos,
    dir: Direction,
    length: usize,
    width: usize,
) -> Option<DeadEndBranch> {
    let (px, py) = dir.perpendicular();
    let mut cells = Vec::new();

    for distance in 1..=length as i32 {
        let (cx, cy) = offset(root, dir.delta(), distance);
        if !grid.in_interior(cx, cy) {
            break;
        }

        let mut center = None;
        for off in band_offsets(width) {
            let (x, y) = (cx + px * off, cy + py * off);
            if !grid.in_interior(x, y) {
                continue;
            }
            if grid.get(x, y) != Some(CellKind::Empty) {
                if distance > 1 {
                    return None;
                }
                continue;
            }
            if off == 0 {
                center = Some((x as usize, y as usize));
            } else {
                cells.push((x as usize, y as usize));
            }
        }
        cells.extend(center);
    }

    if cells.len() < MIN_BRANCH_CELLS {
        return None;
    }
    Some(DeadEndBranch {
        root,
        direction: dir,
        width,
        cells,
    })
}

/// Grow up to `config.dead_end_count` branches and mark their cells DeadEnd
pub fn grow_dead_ends(
    grid: &mut Grid,
    corridor: &CorridorCells,
    config: &GenConfig,
    rng: &mut GameRng,
) -> Vec<DeadEndBranch> {
    let mut branches = Vec::new();

    for attempt in 0..config.dead_end_count {
        let candidates = growth_candidates(grid, corridor, config.dead_end_lookahead);
        let Some(&(root, dirs)) = rng.choose(&candidates) else {
            trace!(attempt, "dead end skipped: no start point");
            continue;
        };
        let dirs = dirs.directions();
        let dir = dirs[rng.index(dirs.len())];
        let length = config.dead_end_length.sample(rng);
        let width = config.dead_end_width.sample(rng);

        match grow_branch(grid, root, dir, length, width) {
            Some(branch) => {
                for &pos in &branch.cells {
                    grid.set_pos(pos, CellKind::DeadEnd);
                }
                branches.push(branch);
            }
            None => trace!(attempt, ?root, ?dir, "dead end skipped: blocked"),
        }
    }

    debug!(
        grown = branches.len(),
        requested = config.dead_end_count,
        "dead ends grown"
    );
    branches
}
