//! # Generation Module
//!
//! Procedural level generation and wave population.
//!
//! Levels start as an open walled field. Rectangular wall clusters are then
//! carved in one at a time, and every cluster that would cut part of the field
//! off from the spawn tile is rolled back. Once the grid is final the wave is
//! populated from a spawn table.

pub mod dungeon;
pub mod encounters;

pub use dungeon::*;
pub use encounters::*;

use crate::config::{DEFAULT_MAX_CLUSTER_ATTEMPTS, GAME_FIELD_HEIGHT, GAME_FIELD_WIDTH};
use crate::game::EntityKind;
use crate::DelveResult;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the grid size, how hard the carver tries to add walls, and how
/// many entities of each kind a wave starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles, border included
    pub width: u32,
    /// Grid height in tiles, border included
    pub height: u32,
    /// Number of cluster placements to try
    pub max_attempts: u32,
    /// Smallest cluster side length
    pub min_cluster_size: u32,
    /// Largest cluster side length
    pub max_cluster_size: u32,
    /// Entities placed at the start of each wave, in order
    #[serde(default = "default_spawn_table")]
    pub spawn_table: Vec<SpawnEntry>,
}

/// How many entities of one kind a wave starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub kind: EntityKind,
    pub count: usize,
}

fn default_spawn_table() -> Vec<SpawnEntry> {
    [
        EntityKind::Enemy,
        EntityKind::Merchant,
        EntityKind::Boss,
        EntityKind::MiniBoss,
    ]
    .into_iter()
    .map(|kind| SpawnEntry { kind, count: 5 })
    .collect()
}

impl GenerationConfig {
    /// Creates the standard 80x30 configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.width, 80);
    /// assert_eq!(config.height, 30);
    /// assert!(config.min_cluster_size <= config.max_cluster_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: GAME_FIELD_WIDTH,
            height: GAME_FIELD_HEIGHT,
            max_attempts: DEFAULT_MAX_CLUSTER_ATTEMPTS,
            min_cluster_size: 2,
            max_cluster_size: 4,
            spawn_table: default_spawn_table(),
        }
    }

    /// Creates a configuration for testing with a small grid and few entities.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 20,
            height: 12,
            max_attempts: 40,
            min_cluster_size: 2,
            max_cluster_size: 3,
            spawn_table: vec![
                SpawnEntry { kind: EntityKind::Enemy, count: 2 },
                SpawnEntry { kind: EntityKind::Merchant, count: 1 },
            ],
        }
    }

    /// Total entities the spawn table asks for, player excluded.
    pub fn requested_entities(&self) -> usize {
        self.spawn_table.iter().map(|entry| entry.count).sum()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> T;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
