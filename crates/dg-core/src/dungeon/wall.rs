//! Wall layer derived from the walkable layout

use tracing::debug;

use super::grid::Pos;
use super::{CellKind, Grid};

/// Turn every Empty cell touching a floor-like cell into Wall
///
/// Neighbours are read from a snapshot taken before the pass, so walls added
/// here never spawn further walls. Returns the number of walls added.
pub fn derive_walls(grid: &mut Grid) -> usize {
    let snapshot = grid.clone();
    let walls: Vec<Pos> = snapshot
        .positions()
        .filter(|&p| snapshot.kind(p).is_empty())
        .filter(|&p| snapshot.floor_like_neighbors(p) > 0)
        .collect();

    for &pos in &walls {
        grid.set_pos(pos, CellKind::Wall);
    }
    walls.len()
}

/// Close any floor left open to the void
///
/// A floor-like cell on the grid edge, or one still touching Empty, walls
/// off all of its Empty neighbours.
pub fn patch_border_gaps(grid: &mut Grid) -> usize {
    let open: Vec<Pos> = grid
        .positions()
        .filter(|&p| grid.kind(p).is_floor_like())
        .filter(|&(x, y)| {
            grid.on_edge(x, y) || grid.count_neighbors((x, y), |k| k.is_empty()) > 0
        })
        .collect();

    let mut patched = 0;
    for pos in open {
        let gaps: Vec<Pos> = grid
            .neighbors8(pos)
            .filter(|&p| grid.kind(p).is_empty())
            .collect();
        for gap in gaps {
            grid.set_pos(gap, CellKind::Wall);
            patched += 1;
        }
    }
    patched
}

/// Derive walls and patch the border
pub fn build_walls(grid: &mut Grid) -> usize {
    let derived = derive_walls(grid);
    let patched = patch_border_gaps(grid);
    debug!(derived, patched, "walls built");
    derived + patched
}
