//! # Game Configuration
//!
//! Compile-time constants shared with the renderer, plus the serializable
//! [`GameConfig`] that the binary loads from disk or builds from CLI flags.

use crate::game::{Position, SimulationConfig};
use crate::generation::GenerationConfig;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Playfield width in tiles.
pub const GAME_FIELD_WIDTH: u32 = 80;

/// Playfield height in tiles.
pub const GAME_FIELD_HEIGHT: u32 = 30;

/// Tile the player spawns on and the connectivity check starts from.
pub const SPAWN_POSITION: Position = Position { x: 1, y: 1 };

/// Number of cluster placements tried per level.
pub const DEFAULT_MAX_CLUSTER_ATTEMPTS: u32 = 150;

/// Hostile ticks between forced target reevaluations.
pub const DEFAULT_REEVAL_INTERVAL: u32 = 10;

/// Wall-clock milliseconds between hostile updates.
pub const DEFAULT_HOSTILE_UPDATE_MS: u64 = 300;

/// Frame budget for the main loop.
pub const TARGET_FRAME_MS: u64 = 20;

/// Smallest grid side that still leaves room for a 4-wide cluster.
const MIN_GRID_SIDE: u32 = 6;

/// Complete runtime configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Level carving and wave population
    pub generation: GenerationConfig,
    /// Hostile update pacing
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl GameConfig {
    /// Creates the default configuration for the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GameConfig;
    ///
    /// let config = GameConfig::new(7);
    /// assert_eq!(config.generation.seed, 7);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::new(seed),
            simulation: SimulationConfig::default(),
        }
    }

    /// Reads a JSON configuration file and validates it.
    pub fn load_from_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the generator or simulation cannot work with.
    pub fn validate(&self) -> DelveResult<()> {
        let generation = &self.generation;

        if generation.width < MIN_GRID_SIDE || generation.height < MIN_GRID_SIDE {
            return Err(DelveError::InvalidConfig(format!(
                "grid must be at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}, got {}x{}",
                generation.width, generation.height
            )));
        }

        if generation.min_cluster_size < 1
            || generation.min_cluster_size > generation.max_cluster_size
        {
            return Err(DelveError::InvalidConfig(format!(
                "cluster size range {}..={} is empty",
                generation.min_cluster_size, generation.max_cluster_size
            )));
        }

        // Placement needs x in [1, width - w - 2].
        if generation.max_cluster_size + 3 > generation.width.min(generation.height) {
            return Err(DelveError::InvalidConfig(format!(
                "clusters up to {} tiles do not fit a {}x{} grid",
                generation.max_cluster_size, generation.width, generation.height
            )));
        }

        if generation.max_attempts == 0 {
            return Err(DelveError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if self.simulation.reeval_interval == 0 {
            return Err(DelveError::InvalidConfig(
                "reeval_interval must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(42)
    }
}
