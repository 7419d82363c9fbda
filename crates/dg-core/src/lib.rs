//! dg-core: procedural dungeon layout generation
//!
//! Places rooms on a grid, joins them with corridors, grows dead-end
//! branches, picks spawn and exit cells, scatters rocks and chests and
//! derives the wall layer. Everything is driven by a seeded [`GameRng`], so
//! a seed and a [`GenConfig`] always reproduce the same dungeon.
//!
//! ```
//! use dg_core::{generate, GameRng, GenConfig};
//!
//! let mut rng = GameRng::new(42);
//! let dungeon = generate(&GenConfig::default(), &mut rng).unwrap();
//! assert!(dungeon.spawn.is_some());
//! ```

pub mod config;
pub mod dungeon;
pub mod error;

mod rng;

pub use config::{DistanceMetric, GenConfig, GridSize, SizeRange};
pub use dungeon::{generate, generate_with_seed, GenerationResult};
pub use error::ConfigurationError;
pub use rng::GameRng;
