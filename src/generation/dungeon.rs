//! # Level Carving
//!
//! Cluster-and-revert generation of connected cave levels.
//!
//! The generator starts from an open field with a walled border and tries a
//! fixed number of rectangular wall clusters. Each cluster is stamped in,
//! connectivity from the spawn tile is recounted, and the cluster is rolled
//! back if any ground tile became unreachable. The result is never
//! disconnected; how dense it gets depends only on the attempt budget.

use crate::config::SPAWN_POSITION;
use crate::game::{GridMap, Position, Tile};
use crate::generation::{GenerationConfig, Generator};
use crate::utils::reachable_count;
use crate::{DelveError, DelveResult};
use log::{debug, log_enabled, trace, Level};
use rand::{rngs::StdRng, Rng};

/// Level generator that carves random wall clusters into an open field.
#[derive(Debug, Clone)]
pub struct ClusterGenerator {
    /// Tile every ground tile must stay reachable from
    pub spawn: Position,
}

/// Outcome of a single cluster attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterOutcome {
    /// The cluster stayed; this many ground tiles became wall
    Committed(usize),
    /// The cluster disconnected the map and was rolled back
    Reverted,
}

impl ClusterGenerator {
    /// Creates a generator anchored at the standard spawn tile.
    pub fn new() -> Self {
        Self {
            spawn: SPAWN_POSITION,
        }
    }

    /// Stamps a `w`x`h` wall cluster at (`x`, `y`) and keeps it only if the map
    /// stays connected.
    ///
    /// `walkable_budget` is the ground count before the attempt and is
    /// decreased on commit. Only cells that were ground are recorded, so a
    /// rollback restores exactly what the stamp changed.
    pub fn try_cluster(
        &self,
        grid: &mut GridMap,
        walkable_budget: &mut usize,
        top_left: Position,
        w: u32,
        h: u32,
    ) -> ClusterOutcome {
        let mut cluster = Vec::with_capacity((w * h) as usize);
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                let pos = Position::new(top_left.x + dx, top_left.y + dy);
                if let Some(index) = grid.index_of(pos) {
                    if grid.tile_at_index(index) == Tile::Ground {
                        grid.set_tile_at_index(index, Tile::Wall);
                        cluster.push(index);
                    }
                }
            }
        }

        let reachable = reachable_count(grid, self.spawn);
        let remaining = walkable_budget.saturating_sub(cluster.len());

        if reachable < remaining {
            for &index in &cluster {
                grid.set_tile_at_index(index, Tile::Ground);
            }
            trace!(
                "Reverted {}x{} cluster at {:?}: {} of {} reachable",
                w,
                h,
                top_left,
                reachable,
                remaining
            );
            ClusterOutcome::Reverted
        } else {
            *walkable_budget = remaining;
            trace!("Committed {}x{} cluster at {:?}", w, h, top_left);
            ClusterOutcome::Committed(cluster.len())
        }
    }

    /// Picks a random cluster that fits strictly inside the border.
    ///
    /// The offset range keeps the rectangle clear of the last interior column
    /// and row as well, so no placement is ever clipped. Returns None when the
    /// drawn size leaves no valid offset on this grid.
    fn random_cluster(
        &self,
        grid: &GridMap,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Option<(Position, u32, u32)> {
        if config.min_cluster_size > config.max_cluster_size {
            return None;
        }
        let w = rng.gen_range(config.min_cluster_size..=config.max_cluster_size);
        let h = rng.gen_range(config.min_cluster_size..=config.max_cluster_size);
        let max_x = grid.width().checked_sub(w + 2).filter(|&max| max >= 1)?;
        let max_y = grid.height().checked_sub(h + 2).filter(|&max| max >= 1)?;
        let x = rng.gen_range(1..=max_x as i32);
        let y = rng.gen_range(1..=max_y as i32);
        Some((Position::new(x, y), w, h))
    }
}

impl Generator<GridMap> for ClusterGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GridMap {
        let mut grid = GridMap::bordered(config.width, config.height);
        let mut walkable_budget = grid.ground_count();
        let mut committed = 0;
        let mut carved = 0;

        for _ in 0..config.max_attempts {
            let Some((top_left, w, h)) = self.random_cluster(&grid, config, rng) else {
                continue;
            };
            if let ClusterOutcome::Committed(walled) =
                self.try_cluster(&mut grid, &mut walkable_budget, top_left, w, h)
            {
                committed += 1;
                carved += walled;
            }
        }

        debug!(
            "{} kept {} of {} clusters ({} tiles walled), {} ground tiles remain",
            self.generator_type(),
            committed,
            config.max_attempts,
            carved,
            walkable_budget
        );
        if log_enabled!(Level::Trace) {
            trace!("Generated level:\n{}", grid.to_ascii().join("\n"));
        }

        grid
    }

    fn validate(&self, grid: &GridMap, config: &GenerationConfig) -> DelveResult<()> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(DelveError::InvalidState(format!(
                "grid is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }

        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = Position::new(x, y);
                if grid.is_border(pos) && grid.is_walkable(pos) {
                    return Err(DelveError::InvalidState(format!(
                        "border tile {pos:?} is not a wall"
                    )));
                }
            }
        }

        let reachable = reachable_count(grid, self.spawn);
        let ground = grid.ground_count();
        if reachable != ground {
            return Err(DelveError::InvalidState(format!(
                "only {reachable} of {ground} ground tiles reachable from {:?}",
                self.spawn
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ClusterGenerator"
    }
}

impl Default for ClusterGenerator {
    fn default() -> Self {
        Self::new()
    }
}
