//! Errors raised while validating a generation request
//!
//! Sampling failures during generation are not errors: they shrink the
//! result (fewer rooms, fewer branches, fallback landmarks) instead.

use thiserror::Error;

/// Invalid generator configuration, raised once at entry
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{field} must be greater than zero")]
    ZeroDimension { field: &'static str },

    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("edge_margin must be at least 1 to leave room for the outer wall ring")]
    InvalidMargin,

    #[error("{field} is a percentage and must be at most 100, got {value}")]
    InvalidPercent { field: &'static str, value: u32 },

    #[error("{field} must lie in [0, 1], got {value}")]
    InvalidDensity { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative distance, got {value}")]
    InvalidDistance { field: &'static str, value: f64 },

    #[error("{field} is too large: {value} exceeds the limit of {max}")]
    TooLarge {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
