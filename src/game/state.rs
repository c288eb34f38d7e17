//! # Game State Module
//!
//! The simulation context owned by the game loop.
//!
//! [`GameState`] holds everything a wave mutates: the grid, the entity
//! registry, the shared navigator, the random source and the hostile update
//! timer. The loop passes it to each phase of a frame in turn (player input,
//! then hostile movement when the timer is due), so nothing is shared between
//! threads and no phase runs concurrently with another.

use crate::config::{GameConfig, DEFAULT_HOSTILE_UPDATE_MS, DEFAULT_REEVAL_INTERVAL};
use crate::game::{
    can_move, update_entities, Direction, EncounterHandler, EntityKind, EntityRegistry, GridMap,
    NavigatorState, Position, TickReport, Tile,
};
use crate::generation::{populate_wave, utils, ClusterGenerator, Generator};
use crate::DelveResult;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Pacing of the hostile side of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Hostile ticks between forced target reevaluations
    pub reeval_interval: u32,
    /// Wall-clock milliseconds between hostile ticks
    pub hostile_update_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reeval_interval: DEFAULT_REEVAL_INTERVAL,
            hostile_update_interval_ms: DEFAULT_HOSTILE_UPDATE_MS,
        }
    }
}

/// Fixed-interval throttle on a monotonic clock.
#[derive(Debug, Clone)]
pub struct UpdateTimer {
    /// Minimum time between two updates
    pub interval: Duration,
    /// When the last update ran
    pub last_update: Option<Instant>,
}

impl UpdateTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_update: None,
        }
    }

    /// Checks if enough time has passed for the next update.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_update {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true, // First update
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_update = Some(now);
    }
}

/// Outcome of a player move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    /// Wall, border or no player; nothing changed
    Blocked,
    /// The player walked onto a free tile
    Moved { from: Position, to: Position },
    /// The player walked onto an entity, which was removed
    Encounter {
        from: Position,
        to: Position,
        kind: EntityKind,
    },
}

/// Central simulation state for the current wave.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session configuration
    pub config: GameConfig,
    /// Terrain of the current wave
    pub grid: GridMap,
    /// Everything standing on the grid
    pub registry: EntityRegistry,
    /// Shared pursuit state
    pub navigator: NavigatorState,
    /// Current wave number, starting at 1
    pub wave: u32,
    /// Hostile ticks run this wave
    pub turn_number: u64,
    /// Throttle for hostile updates
    pub hostile_timer: UpdateTimer,
    rng: StdRng,
}

impl GameState {
    /// Validates the configuration and generates the first wave.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameConfig, GameState, SPAWN_POSITION};
    ///
    /// let state = GameState::new(GameConfig::new(1)).unwrap();
    /// assert_eq!(state.wave, 1);
    /// assert_eq!(state.registry.player_position(), Some(SPAWN_POSITION));
    /// ```
    pub fn new(config: GameConfig) -> DelveResult<Self> {
        let mut state = Self::assemble(
            config,
            GridMap::filled(0, 0, Tile::Wall),
            EntityRegistry::new(),
            0,
        )?;
        state.start_wave();
        Ok(state)
    }

    /// Builds a state around an existing grid and population.
    ///
    /// Used for fixtures and replays. The registry must already contain a
    /// player.
    pub fn new_with_level(
        config: GameConfig,
        grid: GridMap,
        registry: EntityRegistry,
    ) -> DelveResult<Self> {
        Self::assemble(config, grid, registry, 1)
    }

    fn assemble(
        config: GameConfig,
        grid: GridMap,
        registry: EntityRegistry,
        wave: u32,
    ) -> DelveResult<Self> {
        config.validate()?;
        let rng = utils::create_rng(&config.generation);

        Ok(Self {
            navigator: NavigatorState::new(config.simulation.reeval_interval),
            hostile_timer: UpdateTimer::new(Duration::from_millis(
                config.simulation.hostile_update_interval_ms,
            )),
            config,
            grid,
            registry,
            wave,
            turn_number: 0,
            rng,
        })
    }

    /// Regenerates the level and its population.
    ///
    /// The navigator forgets its target and the wave number goes up.
    pub fn start_wave(&mut self) {
        let generator = ClusterGenerator::new();
        self.grid = generator.generate(&self.config.generation, &mut self.rng);
        populate_wave(&self.grid, &mut self.registry, &self.config.generation, &mut self.rng);
        self.navigator.reset();
        self.navigator.step_counter = 0;
        self.turn_number = 0;
        self.wave += 1;

        info!(
            "Wave {}: {} ground tiles, {} entities",
            self.wave,
            self.grid.ground_count(),
            self.registry.len()
        );
    }

    pub fn player_position(&self) -> Option<Position> {
        self.registry.player_position()
    }

    /// Moves the player one tile.
    ///
    /// Moves into walls or off the grid are ignored. Stepping onto another
    /// entity removes it and reports it to `handler` before the player takes
    /// the tile.
    pub fn move_player(
        &mut self,
        direction: Direction,
        handler: &mut dyn EncounterHandler,
    ) -> PlayerMove {
        let Some(from) = self.registry.player_position() else {
            return PlayerMove::Blocked;
        };
        let to = from + direction.to_delta();
        if !can_move(to, &self.grid) {
            return PlayerMove::Blocked;
        }

        let met = self.registry.remove(to);
        if let Some(kind) = met {
            debug!("Player stepped onto {:?} at {:?}", kind, to);
            handler.on_encounter(kind);
        }

        if !self.registry.move_entity(from, to) {
            warn!("Player could not move from {:?} to {:?}", from, to);
            return PlayerMove::Blocked;
        }

        match met {
            Some(kind) => PlayerMove::Encounter { from, to, kind },
            None => PlayerMove::Moved { from, to },
        }
    }

    /// Runs one hostile tick unconditionally.
    pub fn update_entities(&mut self, handler: &mut dyn EncounterHandler) -> TickReport {
        self.turn_number += 1;
        update_entities(
            &self.grid,
            &mut self.registry,
            &mut self.navigator,
            &mut self.rng,
            handler,
        )
    }

    /// Runs a hostile tick if the update interval has elapsed since the last one.
    pub fn update_if_due(
        &mut self,
        now: Instant,
        handler: &mut dyn EncounterHandler,
    ) -> Option<TickReport> {
        if !self.hostile_timer.is_due(now) {
            return None;
        }
        self.hostile_timer.mark(now);
        Some(self.update_entities(handler))
    }

    /// Number of hostiles still on the grid.
    pub fn hostiles_remaining(&self) -> usize {
        self.registry.hostiles().len()
    }
}
