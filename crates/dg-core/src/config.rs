//! Generator configuration
//!
//! Every knob of the pipeline lives in [`GenConfig`]. Missing fields in a
//! JSON config fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::rng::GameRng;

/// Inclusive integer range drawn from uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    pub max: usize,
}

impl SizeRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// `center - delta ..= center + delta`, floored at zero
    pub const fn around(center: usize, delta: usize) -> Self {
        Self {
            min: center.saturating_sub(delta),
            max: center.saturating_add(delta),
        }
    }

    pub const fn fixed(value: usize) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: usize) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn sample(&self, rng: &mut GameRng) -> usize {
        rng.between(self.min, self.max)
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigurationError> {
        if self.min > self.max {
            return Err(ConfigurationError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn check_nonzero(&self, field: &'static str) -> Result<(), ConfigurationError> {
        self.check(field)?;
        if self.min == 0 {
            return Err(ConfigurationError::ZeroDimension { field });
        }
        Ok(())
    }
}

/// How the grid dimensions are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSize {
    Fixed { width: usize, height: usize },
    /// Square grid sized to hold `room_count` rooms of the largest size
    FromRoomCount,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::Fixed {
            width: 60,
            height: 40,
        }
    }
}

/// Distance used by the farthest-point exit search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Manhattan,
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(self, a: (usize, usize), b: (usize, usize)) -> f64 {
        let dx = a.0.abs_diff(b.0) as f64;
        let dy = a.1.abs_diff(b.1) as f64;
        match self {
            DistanceMetric::Manhattan => dx + dy,
            DistanceMetric::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }
}

/// Smallest side produced by [`GridSize::FromRoomCount`]
pub const MIN_DERIVED_SIDE: usize = 20;

/// Largest grid side, fixed or derived
pub const MAX_GRID_SIDE: usize = 1024;

/// Largest value accepted for any count or attempt budget
pub const MAX_COUNT: usize = 10_000;

fn check_limit(field: &'static str, value: usize, max: usize) -> Result<(), ConfigurationError> {
    if value > max {
        return Err(ConfigurationError::TooLarge { field, value, max });
    }
    Ok(())
}

/// Full generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    // Grid
    pub grid: GridSize,

    // Rooms
    pub room_count: usize,
    pub room_size: SizeRange,
    /// Padding added around each room for the overlap test
    pub room_spacing: usize,
    /// Minimum distance from a room to the grid edge
    pub edge_margin: usize,
    pub attempts_per_room: usize,

    // Corridors
    pub corridor_width: SizeRange,
    /// Random room pairs joined after the sequential pass
    pub extra_room_connections: usize,
    /// Random far-apart floor pairs joined after the room pass
    pub extra_corridors: usize,
    pub extra_corridor_min_distance: f64,
    /// Percent chance that a pinch-point neighbour gets carved
    pub widen_chance: u32,

    // Dead ends
    pub dead_end_count: usize,
    pub dead_end_length: SizeRange,
    pub dead_end_width: SizeRange,
    pub dead_end_lookahead: usize,

    // Obstacles
    pub rock_count: SizeRange,
    pub chest_count: SizeRange,
    /// Draws allowed per requested obstacle
    pub obstacle_attempts: usize,
    /// Per-room rock cap as a fraction of room area
    pub room_rock_density: Option<f64>,
    /// Keep rocks in a side layer instead of replacing the floor kind
    pub obstacle_overlay: bool,

    // Landmarks
    pub exit_metric: DistanceMetric,
    pub prefer_dead_end_exit: bool,
    /// Corner anchor used when no corridor cell can host the spawn
    pub landmark_corner_offset: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),

            room_count: 8,
            room_size: SizeRange::new(4, 9),
            room_spacing: 2,
            edge_margin: 2,
            attempts_per_room: 50,

            corridor_width: SizeRange::new(2, 4),
            extra_room_connections: 2,
            extra_corridors: 2,
            extra_corridor_min_distance: 12.0,
            widen_chance: 30,

            dead_end_count: 4,
            dead_end_length: SizeRange::new(8, 12),
            dead_end_width: SizeRange::new(2, 3),
            dead_end_lookahead: 5,

            rock_count: SizeRange::new(6, 12),
            chest_count: SizeRange::new(2, 4),
            obstacle_attempts: 20,
            room_rock_density: Some(0.08),
            obstacle_overlay: false,

            exit_metric: DistanceMetric::Manhattan,
            prefer_dead_end_exit: false,
            landmark_corner_offset: 2,
        }
    }
}

impl GenConfig {
    /// Load a JSON config from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a JSON config; absent fields keep their defaults
    pub fn from_json(contents: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations no generation run could honour
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let GridSize::Fixed { width, height } = self.grid {
            if width == 0 {
                return Err(ConfigurationError::ZeroDimension { field: "grid.width" });
            }
            if height == 0 {
                return Err(ConfigurationError::ZeroDimension {
                    field: "grid.height",
                });
            }
        }
        if self.edge_margin == 0 {
            return Err(ConfigurationError::InvalidMargin);
        }
        if self.attempts_per_room == 0 {
            return Err(ConfigurationError::ZeroDimension {
                field: "attempts_per_room",
            });
        }

        self.room_size.check_nonzero("room_size")?;
        self.corridor_width.check_nonzero("corridor_width")?;
        self.dead_end_length.check_nonzero("dead_end_length")?;
        self.dead_end_width.check_nonzero("dead_end_width")?;
        self.rock_count.check("rock_count")?;
        self.chest_count.check("chest_count")?;

        if let GridSize::Fixed { width, height } = self.grid {
            check_limit("grid.width", width, MAX_GRID_SIDE)?;
            check_limit("grid.height", height, MAX_GRID_SIDE)?;
        }
        let lengths = [
            ("room_size", self.room_size.max),
            ("room_spacing", self.room_spacing),
            ("edge_margin", self.edge_margin),
            ("corridor_width", self.corridor_width.max),
            ("dead_end_length", self.dead_end_length.max),
            ("dead_end_width", self.dead_end_width.max),
            ("dead_end_lookahead", self.dead_end_lookahead),
            ("landmark_corner_offset", self.landmark_corner_offset),
        ];
        for (field, value) in lengths {
            check_limit(field, value, MAX_GRID_SIDE)?;
        }
        let counts = [
            ("room_count", self.room_count),
            ("attempts_per_room", self.attempts_per_room),
            ("extra_room_connections", self.extra_room_connections),
            ("extra_corridors", self.extra_corridors),
            ("dead_end_count", self.dead_end_count),
            ("rock_count", self.rock_count.max),
            ("chest_count", self.chest_count.max),
            ("obstacle_attempts", self.obstacle_attempts),
        ];
        for (field, value) in counts {
            check_limit(field, value, MAX_COUNT)?;
        }
        let (width, height) = self.grid_dimensions();
        check_limit("grid", width.max(height), MAX_GRID_SIDE)?;

        if self.widen_chance > 100 {
            return Err(ConfigurationError::InvalidPercent {
                field: "widen_chance",
                value: self.widen_chance,
            });
        }
        if let Some(density) = self.room_rock_density
            && !(0.0..=1.0).contains(&density)
        {
            return Err(ConfigurationError::InvalidDensity {
                field: "room_rock_density",
                value: density,
            });
        }
        if !self.extra_corridor_min_distance.is_finite() || self.extra_corridor_min_distance < 0.0 {
            return Err(ConfigurationError::InvalidDistance {
                field: "extra_corridor_min_distance",
                value: self.extra_corridor_min_distance,
            });
        }
        Ok(())
    }

    /// Grid dimensions for this run as (width, height)
    pub fn grid_dimensions(&self) -> (usize, usize) {
        match self.grid {
            GridSize::Fixed { width, height } => (width, height),
            GridSize::FromRoomCount => {
                let per_side = (self.room_count.max(1) as f64).sqrt().ceil() as usize;
                let cell = self
                    .room_size
                    .max
                    .saturating_add(self.room_spacing.saturating_mul(2));
                let side = per_side
                    .saturating_mul(cell)
                    .saturating_add(self.edge_margin.saturating_mul(2))
                    .max(MIN_DERIVED_SIDE);
                (side, side)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_dimensions(), (60, 40));
        assert!(!config.obstacle_overlay);
    }

    #[test]
    fn test_size_range_around() {
        assert_eq!(SizeRange::around(6, 2), SizeRange::new(4, 8));
        assert_eq!(SizeRange::around(1, 3), SizeRange::new(0, 4));
        assert!(SizeRange::fixed(3).contains(3));
        assert!(!SizeRange::fixed(3).contains(4));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = GenConfig {
            grid: GridSize::Fixed {
                width: 0,
                height: 10,
            },
            ..GenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::ZeroDimension { field: "grid.width" })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = GenConfig {
            corridor_width: SizeRange::new(4, 2),
            ..GenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidRange {
                field: "corridor_width",
                min: 4,
                max: 2
            })
        ));
    }

    #[test]
    fn test_zero_room_size_rejected() {
        let config = GenConfig {
            room_size: SizeRange::new(0, 3),
            ..GenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::ZeroDimension { field: "room_size" })
        ));
    }

    #[test]
    fn test_bad_probabilities_rejected() {
        let config = GenConfig {
            widen_chance: 150,
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GenConfig {
            room_rock_density: Some(1.5),
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GenConfig {
            extra_corridor_min_distance: f64::NAN,
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GenConfig {
            edge_margin: 0,
            ..GenConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigurationError::InvalidMargin)));
    }

    #[test]
    fn test_zero_rooms_is_valid() {
        let config = GenConfig {
            room_count: 0,
            ..GenConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_grid_size() {
        let config = GenConfig {
            grid: GridSize::FromRoomCount,
            room_count: 9,
            room_size: SizeRange::new(4, 8),
            room_spacing: 2,
            edge_margin: 2,
            ..GenConfig::default()
        };
        // 3 rooms per side * (8 + 4) + 4
        assert_eq!(config.grid_dimensions(), (40, 40));

        let tiny = GenConfig {
            grid: GridSize::FromRoomCount,
            room_count: 1,
            room_size: SizeRange::new(2, 3),
            ..GenConfig::default()
        };
        assert_eq!(tiny.grid_dimensions(), (MIN_DERIVED_SIDE, MIN_DERIVED_SIDE));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let json = format!(r#"{{ "room_count": {} }}"#, u64::MAX);
        assert!(matches!(
            GenConfig::from_json(&json),
            Err(ConfigurationError::TooLarge { field: "room_count", .. })
        ));

        let config = GenConfig {
            rock_count: SizeRange::fixed(usize::MAX),
            ..GenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::TooLarge { field: "rock_count", .. })
        ));

        let config = GenConfig {
            obstacle_attempts: MAX_COUNT + 1,
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GenConfig {
            room_count: MAX_COUNT,
            ..GenConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let config = GenConfig {
            grid: GridSize::Fixed {
                width: usize::MAX,
                height: 10,
            },
            ..GenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::TooLarge {
                field: "grid.width",
                max: MAX_GRID_SIDE,
                ..
            })
        ));

        // 100 rooms per side * (1000 + 4) + 4 cells
        let derived = GenConfig {
            grid: GridSize::FromRoomCount,
            room_count: MAX_COUNT,
            room_size: SizeRange::new(4, 1000),
            ..GenConfig::default()
        };
        assert_eq!(derived.grid_dimensions(), (100_404, 100_404));
        assert!(matches!(
            derived.validate(),
            Err(ConfigurationError::TooLarge { field: "grid", .. })
        ));
    }

    #[test]
    fn test_derived_grid_size_saturates() {
        let config = GenConfig {
            grid: GridSize::FromRoomCount,
            room_spacing: usize::MAX,
            ..GenConfig::default()
        };
        assert_eq!(config.grid_dimensions(), (usize::MAX, usize::MAX));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::TooLarge { field: "room_spacing", .. })
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "room_count": 3, "obstacle_overlay": true, "exit_metric": "euclidean" }"#;
        let config = GenConfig::from_json(json).unwrap();
        assert_eq!(config.room_count, 3);
        assert!(config.obstacle_overlay);
        assert_eq!(config.exit_metric, DistanceMetric::Euclidean);
        assert_eq!(config.corridor_width, SizeRange::new(2, 4));
    }

    #[test]
    fn test_json_grid_variants() {
        let fixed = GenConfig::from_json(r#"{ "grid": { "fixed": { "width": 30, "height": 25 } } }"#)
            .unwrap();
        assert_eq!(fixed.grid_dimensions(), (30, 25));

        let derived = GenConfig::from_json(r#"{ "grid": "from_room_count" }"#).unwrap();
        assert_eq!(derived.grid, GridSize::FromRoomCount);
    }

    #[test]
    fn test_invalid_json_reports_parse_error() {
        assert!(matches!(
            GenConfig::from_json("{ not json"),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            GenConfig::from_json(r#"{ "dead_end_width": { "min": 3, "max": 1 } }"#),
            Err(ConfigurationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_roundtrip() {
        let config = GenConfig {
            room_count: 5,
            prefer_dead_end_exit: true,
            room_rock_density: None,
            ..GenConfig::default()
        };
        let json = config.to_json().unwrap();
        let parsed = GenConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_distance_metrics() {
        assert_eq!(DistanceMetric::Manhattan.distance((0, 0), (3, 4)), 7.0);
        assert_eq!(DistanceMetric::Euclidean.distance((0, 0), (3, 4)), 5.0);
        assert_eq!(DistanceMetric::Manhattan.distance((5, 5), (2, 1)), 7.0);
    }
}
