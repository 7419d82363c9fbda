//! End-to-end checks on generated dungeons
//!
//! Every test runs the full pipeline over a range of seeds and checks the
//! layout properties the stages guarantee together.

mod common;

use common::assert_invariants;
use dg_core::dungeon::CellKind;
use dg_core::{generate, generate_with_seed, DistanceMetric, GameRng, GenConfig, GridSize, SizeRange};

fn sized(width: usize, height: usize, rooms: usize) -> GenConfig {
    GenConfig {
        grid: GridSize::Fixed { width, height },
        room_count: rooms,
        ..GenConfig::default()
    }
}

// ============================================================================
// Invariants across seeds
// ============================================================================

#[test]
fn test_default_config_invariants() {
    let config = GenConfig::default();
    for seed in 0..50 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
        assert!(result.spawn.is_some(), "seed {seed} has no spawn");
        assert!(result.exit.is_some(), "seed {seed} has no exit");
    }
}

#[test]
fn test_overlay_invariants() {
    let config = GenConfig {
        obstacle_overlay: true,
        ..GenConfig::default()
    };
    for seed in 0..30 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
        assert_eq!(result.grid.count(CellKind::Rock), 0);
    }
}

#[test]
fn test_euclidean_exit_invariants() {
    let config = GenConfig {
        exit_metric: DistanceMetric::Euclidean,
        ..GenConfig::default()
    };
    for seed in 0..30 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
    }
}

#[test]
fn test_dead_end_exit_preference() {
    let config = GenConfig {
        prefer_dead_end_exit: true,
        dead_end_count: 6,
        ..GenConfig::default()
    };
    for seed in 0..30 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
        let exit = result.exit.unwrap();
        assert_eq!(result.grid.kind(exit), CellKind::Exit);
    }
}

#[test]
fn test_no_density_cap_invariants() {
    let config = GenConfig {
        room_rock_density: None,
        rock_count: SizeRange::new(20, 30),
        ..GenConfig::default()
    };
    for seed in 0..20 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
    }
}

// ============================================================================
// Boundary configurations
// ============================================================================

#[test]
fn test_minimum_config() {
    let config = GenConfig {
        room_size: SizeRange::new(2, 4),
        dead_end_length: SizeRange::new(3, 5),
        ..sized(16, 16, 3)
    };
    for seed in 0..30 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
        assert!(!result.rooms.is_empty());
    }
}

#[test]
fn test_single_room_falls_back_to_corner() {
    let config = sized(20, 20, 1);
    for seed in 0..20 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
        assert_eq!(result.rooms.len(), 1);
        assert!(result.corridor_cells.is_empty());

        // spawn is the room cell closest to the (2, 2) anchor
        let spawn = result.spawn.unwrap();
        let anchor_distance = |(x, y): (usize, usize)| x.abs_diff(2) + y.abs_diff(2);
        for pos in result
            .grid
            .positions_where(|k| k.is_floor_like() || k == CellKind::Rock)
        {
            assert!(anchor_distance(spawn) <= anchor_distance(pos));
        }
    }
}

#[test]
fn test_forty_square_six_rooms() {
    let config = sized(40, 40, 6);
    let half_diagonal = (40f64 * 40.0 + 40.0 * 40.0).sqrt() / 2.0;
    let mut far_exits = 0;
    for seed in 0..20 {
        let result = generate_with_seed(&config, seed).unwrap();
        assert_invariants(&result, &config);
        assert!((1..=6).contains(&result.rooms.len()));

        let (spawn, exit) = (result.spawn.unwrap(), result.exit.unwrap());
        if config.exit_metric.distance(spawn, exit) > half_diagonal {
            far_exits += 1;
        }
    }
    assert!(
        far_exits >= 18,
        "only {far_exits} of 20 exits were past half the diagonal ({half_diagonal:.2})"
    );
}

#[test]
fn test_zero_rooms() {
    let config = sized(30, 30, 0);
    let result = generate_with_seed(&config, 42).unwrap();
    assert_invariants(&result, &config);
    assert!(result.rooms.is_empty());
    assert!(result.corridor_cells.is_empty());
    assert_eq!(result.spawn, None);
}

#[test]
fn test_crowded_grid_places_fewer_rooms() {
    let config = sized(24, 24, 20);
    let result = generate_with_seed(&config, 42).unwrap();
    assert_invariants(&result, &config);
    assert!(result.rooms.len() < 20);
    assert_eq!(result.stats.rooms_requested, 20);
    assert_eq!(result.stats.rooms_placed, result.rooms.len());
}

#[test]
fn test_derived_grid() {
    let config = GenConfig {
        grid: GridSize::FromRoomCount,
        room_count: 12,
        ..GenConfig::default()
    };
    let result = generate_with_seed(&config, 9).unwrap();
    assert_invariants(&result, &config);
    assert_eq!(result.grid.width(), result.grid.height());
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_same_seed_same_grid() {
    let config = GenConfig::default();
    for seed in [0, 1, 42, u64::MAX] {
        let a = generate(&config, &mut GameRng::new(seed)).unwrap();
        let b = generate(&config, &mut GameRng::new(seed)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.to_text(), b.to_text());
        assert_eq!(a, b);
    }
}

#[test]
fn test_rng_keeps_advancing() {
    let config = GenConfig::default();
    let mut rng = GameRng::new(42);
    let first = generate(&config, &mut rng).unwrap();
    let second = generate(&config, &mut rng).unwrap();
    assert_eq!(first.seed, second.seed);
    assert_ne!(first.grid, second.grid);
}

#[test]
fn test_config_file_roundtrip() {
    let config = GenConfig {
        room_count: 5,
        obstacle_overlay: true,
        ..sized(45, 35, 5)
    };
    let parsed = GenConfig::from_json(&config.to_json().unwrap()).unwrap();
    let a = generate_with_seed(&config, 3).unwrap();
    let b = generate_with_seed(&parsed, 3).unwrap();
    assert_eq!(a, b);
}
