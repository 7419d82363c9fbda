//! Dungeon layout
//!
//! Contains the cell grid, room rectangles and the generation stages that
//! fill them in.

mod cell;
mod corridor;
mod dead_end;
mod generation;
mod grid;
mod landmark;
mod obstacle;
mod room;
mod room_placer;
mod wall;

pub use cell::CellKind;
pub use corridor::{
    carve_corridors, carve_extra_corridors, carve_l_corridor, connect_rooms, widen_corridors,
    CorridorCells, EXTRA_PAIR_ATTEMPTS, WIDEN_MAX_FLOOR_NEIGHBORS,
};
pub use dead_end::{
    can_grow_in_direction, grow_branch, grow_dead_ends, growable_directions, DeadEndBranch,
    MIN_BRANCH_CELLS,
};
pub use generation::{generate, generate_with_seed, GenerationResult, GenerationStats};
pub use grid::{band_offsets, Direction, DirectionSet, Grid, Pos, NEIGHBORS_8};
pub use landmark::{
    place_exit, place_landmarks, place_spawn, Landmarks, DEAD_END_LIKE_MAX_NEIGHBORS,
};
pub use obstacle::{
    cap_room_density, place_chests, place_obstacles, scatter_rocks, Obstacles,
    CORRIDOR_ROCK_MIN_NEIGHBORS, MIN_WALKABLE_NEIGHBORS,
};
pub use room::{in_any_room, room_at, PaddedBounds, Room};
pub use room_placer::{place_rooms, stamp_room, TOTAL_ATTEMPTS_PER_ROOM};
pub use wall::{build_walls, derive_walls, patch_border_gaps};
