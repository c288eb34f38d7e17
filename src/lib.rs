//! # Delve
//!
//! Simulation core of a turn-driven, grid-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The crate is split along the same seams the game loop uses each frame:
//!
//! - **Generation**: carves wall clusters into an open field while keeping every
//!   ground tile reachable from the spawn corner, then populates the wave
//! - **Game**: the grid, the position-indexed entity registry, the pursuit
//!   navigator and the per-tick movement resolver, owned by [`GameState`]
//! - **Utils**: breadth-first connectivity counting, A* and Bresenham rays
//! - **Input / Rendering**: thin macroquad glue for the binary
//!
//! Combat, shops and win/lose screens are not part of the core. They plug in
//! through [`EncounterHandler`], which is told the kind of every entity that
//! reaches the player.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use config::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Delve engine.
///
/// Only the ambient layer (configuration, startup) produces errors. Level
/// generation, pathfinding and movement express failure as degenerate results
/// instead: a sparser map, an empty path, a rejected move.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
