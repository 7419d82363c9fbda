//! Checks shared by the integration tests

use dg_core::dungeon::{CellKind, MIN_BRANCH_CELLS, MIN_WALKABLE_NEIGHBORS, Pos};
use dg_core::{GenConfig, GenerationResult};

fn touching(a: Pos, b: Pos) -> bool {
    a != b && a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

fn walkable_neighbors(result: &GenerationResult, pos: Pos) -> usize {
    result
        .grid
        .neighbors8(pos)
        .filter(|&p| result.is_walkable(p))
        .count()
}

pub fn assert_rooms_apart(result: &GenerationResult, config: &GenConfig) {
    assert!(result.rooms.len() <= config.room_count);
    for (i, a) in result.rooms.iter().enumerate() {
        for b in &result.rooms[i + 1..] {
            assert!(!a.overlaps(b, config.room_spacing), "{a:?} overlaps {b:?}");
        }
    }
}

/// Every wall borders walkable floor or closes a gap on the grid edge
pub fn assert_walls_touch_floor(result: &GenerationResult) {
    let grid = &result.grid;
    for pos in grid.positions_where(|k| k == CellKind::Wall) {
        assert!(
            grid.floor_like_neighbors(pos) > 0 || grid.on_edge(pos.0, pos.1),
            "wall at {pos:?} has no floor-like neighbour"
        );
    }
}

/// Nothing walkable touches the void or sits on the grid edge
pub fn assert_floor_enclosed(result: &GenerationResult) {
    let grid = &result.grid;
    for pos in grid.positions_where(|k| k.is_floor_like()) {
        assert!(!grid.on_edge(pos.0, pos.1), "floor on edge at {pos:?}");
        assert_eq!(
            grid.count_neighbors(pos, |k| k.is_empty()),
            0,
            "floor at {pos:?} is open to empty space"
        );
    }
}

pub fn assert_landmarks(result: &GenerationResult, config: &GenConfig) {
    let grid = &result.grid;
    let Some(spawn) = result.spawn else {
        assert_eq!(result.exit, None);
        return;
    };
    assert_eq!(grid.kind(spawn), CellKind::Spawn);
    assert_eq!(grid.count(CellKind::Spawn), 1);

    let Some(exit) = result.exit else {
        return;
    };
    assert_ne!(spawn, exit);
    assert_eq!(grid.kind(exit), CellKind::Exit);
    assert_eq!(grid.count(CellKind::Exit), 1);

    if !config.prefer_dead_end_exit {
        let metric = config.exit_metric;
        let exit_distance = metric.distance(spawn, exit);
        for &cell in result.corridor_cells.iter() {
            assert!(
                exit_distance >= metric.distance(spawn, cell),
                "corridor cell {cell:?} is farther from spawn than exit {exit:?}"
            );
        }
    }
}

pub fn assert_dead_ends(result: &GenerationResult) {
    for branch in &result.dead_ends {
        assert!(branch.len() >= MIN_BRANCH_CELLS);
        for &pos in &branch.cells {
            assert!(!result.corridor_cells.contains(pos));
            assert!(!result.rooms.iter().any(|r| r.contains(pos.0, pos.1)));
            assert!(matches!(
                result.grid.kind(pos),
                CellKind::DeadEnd | CellKind::Chest | CellKind::Spawn | CellKind::Exit
            ));
        }
    }
}

pub fn assert_obstacles(result: &GenerationResult) {
    for (i, &a) in result.rocks.iter().enumerate() {
        for &b in &result.rocks[i + 1..] {
            assert!(!touching(a, b), "rocks {a:?} and {b:?} touch");
        }
        assert!(walkable_neighbors(result, a) >= MIN_WALKABLE_NEIGHBORS);
        assert!(Some(a) != result.spawn && Some(a) != result.exit);
        let expected = if result.obstacle_overlay {
            CellKind::Floor
        } else {
            CellKind::Rock
        };
        assert_eq!(result.grid.kind(a), expected);
    }
    for &chest in &result.chests {
        assert_eq!(result.grid.kind(chest), CellKind::Chest);
        assert!(walkable_neighbors(result, chest) >= MIN_WALKABLE_NEIGHBORS);
    }
}

pub fn assert_invariants(result: &GenerationResult, config: &GenConfig) {
    assert_rooms_apart(result, config);
    assert_walls_touch_floor(result);
    assert_floor_enclosed(result);
    assert_landmarks(result, config);
    assert_dead_ends(result);
    assert_obstacles(result);
}
