//! # Encounter Placement
//!
//! Scatters entities over the ground tiles of a freshly generated level.

use crate::config::SPAWN_POSITION;
use crate::game::{EntityKind, EntityRegistry, GridMap};
use crate::generation::GenerationConfig;
use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom};

/// Places up to `count` entities of `kind` on random free ground tiles.
///
/// Ground tiles are shuffled uniformly and filled in that order, skipping
/// occupied ones. When the free tiles run out fewer entities are placed; the
/// return value says how many actually landed.
///
/// # Examples
///
/// ```
/// use delve::{place_randomly, EntityKind, EntityRegistry, GridMap};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let grid = GridMap::bordered(6, 4);
/// let mut registry = EntityRegistry::new();
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let placed = place_randomly(&grid, &mut registry, EntityKind::Enemy, 3, &mut rng);
/// assert_eq!(placed, 3);
/// assert_eq!(registry.count_of(EntityKind::Enemy), 3);
/// ```
pub fn place_randomly(
    grid: &GridMap,
    registry: &mut EntityRegistry,
    kind: EntityKind,
    count: usize,
    rng: &mut StdRng,
) -> usize {
    let mut candidates = grid.ground_positions();
    candidates.shuffle(rng);

    let mut placed = 0;
    for pos in candidates {
        if placed >= count {
            break;
        }
        if registry.insert(pos, kind) {
            placed += 1;
        }
    }

    if placed < count {
        debug!("Placed {placed} of {count} {:?}: no free ground left", kind);
    }
    placed
}

/// Builds a wave's population on `grid`.
///
/// The registry is cleared, the player goes on the spawn tile first, and the
/// spawn table is then applied in order.
pub fn populate_wave(
    grid: &GridMap,
    registry: &mut EntityRegistry,
    config: &GenerationConfig,
    rng: &mut StdRng,
) {
    registry.clear();
    if !registry.insert(SPAWN_POSITION, EntityKind::Player) {
        warn!("Spawn tile {:?} could not take the player", SPAWN_POSITION);
    }

    for entry in &config.spawn_table {
        place_randomly(grid, registry, entry.kind, entry.count, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_placement_on_exact_ground_count() {
        // 10 ground tiles
        let grid = GridMap::from_rows(&["############", "#          #", "############"]);
        assert_eq!(grid.ground_count(), 10);

        let mut registry = EntityRegistry::new();
        let mut rng = StdRng::seed_from_u64(5);
        let placed = place_randomly(&grid, &mut registry, EntityKind::Enemy, 5, &mut rng);

        assert_eq!(placed, 5);
        let positions: HashSet<Position> = registry.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions.len(), 5);
        assert!(positions.iter().all(|&pos| grid.is_walkable(pos)));
    }

    #[test]
    fn test_placement_underfills_silently() {
        let grid = GridMap::from_rows(&["#####", "#   #", "#####"]);
        let mut registry = EntityRegistry::new();
        registry.insert(Position::new(2, 1), EntityKind::Merchant);
        let mut rng = StdRng::seed_from_u64(9);

        let placed = place_randomly(&grid, &mut registry, EntityKind::Boss, 5, &mut rng);
        assert_eq!(placed, 2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(Position::new(2, 1)), Some(EntityKind::Merchant));
    }

    #[test]
    fn test_populate_wave_puts_player_on_spawn() {
        let config = GenerationConfig::new(3);
        let grid = GridMap::bordered(config.width, config.height);
        let mut registry = EntityRegistry::new();
        registry.insert(Position::new(10, 10), EntityKind::Boss);
        let mut rng = StdRng::seed_from_u64(3);

        populate_wave(&grid, &mut registry, &config, &mut rng);

        assert_eq!(registry.player_position(), Some(SPAWN_POSITION));
        assert_eq!(registry.len(), 1 + config.requested_entities());
        for entry in &config.spawn_table {
            assert_eq!(registry.count_of(entry.kind), entry.count);
        }
    }
}
