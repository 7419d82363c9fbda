//! Room placement by rejection sampling
//!
//! Rooms are drawn one at a time with a random size and top-left corner and
//! kept only if their padded bounds stay clear of every accepted room.
//! Running out of attempts yields a smaller dungeon, never an error.

use tracing::{debug, trace};

use crate::config::GenConfig;
use crate::rng::GameRng;

use super::{CellKind, Grid, Room};

/// Overall draw budget per requested room
pub const TOTAL_ATTEMPTS_PER_ROOM: usize = 100;

/// Place up to `config.room_count` rooms and stamp their interiors Floor
pub fn place_rooms(grid: &mut Grid, config: &GenConfig, rng: &mut GameRng) -> Vec<Room> {
    let wanted = config.room_count;
    // every room covers at least one cell
    let mut rooms: Vec<Room> = Vec::with_capacity(wanted.min(grid.width() * grid.height()));
    let mut total_budget = wanted.saturating_mul(TOTAL_ATTEMPTS_PER_ROOM);

    'rooms: for index in 0..wanted {
        for _ in 0..config.attempts_per_room {
            if total_budget == 0 {
                break 'rooms;
            }
            total_budget -= 1;

            let Some(candidate) = draw_candidate(grid, config, rng) else {
                continue;
            };

            if rooms
                .iter()
                .any(|r| candidate.overlaps(r, config.room_spacing))
            {
                trace!(room = index, ?candidate, "room rejected: padded overlap");
                continue;
            }

            rooms.push(candidate);
            continue 'rooms;
        }
        trace!(room = index, "room skipped: attempts exhausted");
    }

    for room in &rooms {
        stamp_room(grid, room);
    }

    debug!(placed = rooms.len(), requested = wanted, "rooms placed");
    rooms
}

/// Draw one random room that fits inside the grid margins
///
/// Returns `None` when the drawn size cannot fit at all.
fn draw_candidate(grid: &Grid, config: &GenConfig, rng: &mut GameRng) -> Option<Room> {
    let width = config.room_size.sample(rng);
    let height = config.room_size.sample(rng);
    let margin = config.edge_margin;

    // Leave `margin` cells on both sides of each axis
    let max_x = grid.width().checked_sub(margin.saturating_add(width))?;
    let max_y = grid.height().checked_sub(margin.saturating_add(height))?;
    if max_x < margin || max_y < margin {
        return None;
    }

    let x = rng.between(margin, max_x);
    let y = rng.between(margin, max_y);
    Some(Room::new(x, y, width, height))
}

/// Stamp every interior cell of a room Floor
pub fn stamp_room(grid: &mut Grid, room: &Room) {
    for pos in room.cells() {
        grid.set_pos(pos, CellKind::Floor);
    }
}
