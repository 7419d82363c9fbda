//! Spawn and exit selection
//!
//! Spawn sits on corridor floor outside every room. Exit is the floor cell
//! farthest from spawn by straight-line distance (Manhattan or Euclidean),
//! not by walking distance.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenConfig;
use crate::rng::GameRng;

use super::corridor::CorridorCells;
use super::grid::Pos;
use super::room::in_any_room;
use super::{CellKind, Grid, Room};

/// Most floor-like neighbours a cell may have to count as dead-end-like
pub const DEAD_END_LIKE_MAX_NEIGHBORS: usize = 2;

/// Chosen spawn and exit cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmarks {
    pub spawn: Option<Pos>,
    pub exit: Option<Pos>,
}

/// Cells a landmark may be stamped onto
fn hosts_landmark(kind: CellKind) -> bool {
    matches!(kind, CellKind::Floor | CellKind::DeadEnd)
}

/// Pick the spawn cell and stamp it `CellKind::Spawn`
///
/// Falls back to the landmark cell nearest the corner anchor when no
/// corridor cell outside the rooms is available.
pub fn place_spawn(
    grid: &mut Grid,
    rooms: &[Room],
    corridor: &CorridorCells,
    config: &GenConfig,
    rng: &mut GameRng,
) -> Option<Pos> {
    let candidates: Vec<Pos> = corridor
        .iter()
        .copied()
        .filter(|&(x, y)| grid.kind((x, y)) == CellKind::Floor && !in_any_room(rooms, x, y))
        .collect();

    let spawn = match rng.choose(&candidates) {
        Some(&pos) => Some(pos),
        None => {
            let anchor = corner_anchor(grid, config.landmark_corner_offset);
            let fallback = nearest_landmark_host(grid, anchor);
            debug!(?anchor, ?fallback, "spawn fell back to corner anchor");
            fallback
        }
    };

    if let Some(pos) = spawn {
        grid.set_pos(pos, CellKind::Spawn);
    }
    spawn
}

/// Fixed corner position, clamped into the grid
fn corner_anchor(grid: &Grid, offset: usize) -> Pos {
    (
        offset.min(grid.width().saturating_sub(1)),
        offset.min(grid.height().saturating_sub(1)),
    )
}

/// Closest cell able to host a landmark, ties going to scan order
fn nearest_landmark_host(grid: &Grid, anchor: Pos) -> Option<Pos> {
    let mut best: Option<(Pos, usize)> = None;
    for pos in grid.positions() {
        if !hosts_landmark(grid.kind(pos)) {
            continue;
        }
        let dist = pos.0.abs_diff(anchor.0) + pos.1.abs_diff(anchor.1);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((pos, dist));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Pick the exit cell farthest from `spawn` and stamp it `CellKind::Exit`
pub fn place_exit(
    grid: &mut Grid,
    rooms: &[Room],
    spawn: Pos,
    config: &GenConfig,
) -> Option<Pos> {
    let metric = config.exit_metric;
    let mut candidates: Vec<(Pos, f64)> = grid
        .positions()
        .filter(|&p| p != spawn && hosts_landmark(grid.kind(p)))
        .map(|p| (p, metric.distance(spawn, p)))
        .collect();

    if config.prefer_dead_end_exit {
        let dead_end_like: Vec<(Pos, f64)> = candidates
            .iter()
            .copied()
            .filter(|&(p, _)| grid.floor_like_neighbors(p) <= DEAD_END_LIKE_MAX_NEIGHBORS)
            .collect();
        if !dead_end_like.is_empty() {
            candidates = dead_end_like;
        }
    }

    let mut exit = farthest(&candidates)?;

    if config.prefer_dead_end_exit && in_any_room(rooms, exit.0, exit.1) {
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        if let Some(&(pos, _)) = candidates
            .iter()
            .find(|&&((x, y), _)| !in_any_room(rooms, x, y))
        {
            exit = pos;
        }
    }

    grid.set_pos(exit, CellKind::Exit);
    Some(exit)
}

/// First candidate with the greatest distance
fn farthest(candidates: &[(Pos, f64)]) -> Option<Pos> {
    let mut best: Option<(Pos, f64)> = None;
    for &(pos, dist) in candidates {
        if best.is_none_or(|(_, d)| dist > d) {
            best = Some((pos, dist));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Place spawn, then exit relative to it
pub fn place_landmarks(
    grid: &mut Grid,
    rooms: &[Room],
    corridor: &CorridorCells,
    config: &GenConfig,
    rng: &mut GameRng,
) -> Landmarks {
    let spawn = place_spawn(grid, rooms, corridor, config, rng);
    let exit = spawn.and_then(|s| place_exit(grid, rooms, s, config));
    debug!(?spawn, ?exit, "landmarks placed");
    Landmarks { spawn, exit }
}
