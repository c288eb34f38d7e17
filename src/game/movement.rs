//! # Movement Resolution
//!
//! One hostile tick: the pursuer follows its planned path, every other
//! non-player entity takes a random step, and anything that lands on the
//! player triggers an encounter instead of moving.

use crate::game::{Direction, EntityKind, EntityRegistry, GridMap, NavigatorState, Position};
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeSet;

/// Receives every encounter between the player and another entity.
///
/// Combat and shop screens live behind this trait; the core only reports
/// which kind of entity was met. Any `FnMut(EntityKind)` closure works.
pub trait EncounterHandler {
    fn on_encounter(&mut self, kind: EntityKind);
}

impl<F: FnMut(EntityKind)> EncounterHandler for F {
    fn on_encounter(&mut self, kind: EntityKind) {
        self(kind)
    }
}

/// What changed during one hostile tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Cells whose occupant changed, row-major
    pub changed: BTreeSet<Position>,
    /// Kinds of entities that reached the player, in resolution order
    pub encounters: Vec<EntityKind>,
}

impl TickReport {
    /// Rows the renderer has to redraw.
    pub fn changed_rows(&self) -> BTreeSet<i32> {
        self.changed.iter().map(|pos| pos.y).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.encounters.is_empty()
    }
}

/// Runs one hostile tick against the registry.
///
/// The navigator is advanced first, then every non-player entity from a
/// row-major snapshot gets one move. Entities removed earlier in the same
/// tick are skipped. Does nothing when there is no player.
pub fn update_entities(
    grid: &GridMap,
    registry: &mut EntityRegistry,
    navigator: &mut NavigatorState,
    rng: &mut StdRng,
    handler: &mut dyn EncounterHandler,
) -> TickReport {
    let mut report = TickReport::default();
    let Some(player) = registry.player_position() else {
        return report;
    };

    navigator.tick(grid, registry, player);

    for pos in registry.non_player_positions() {
        let Some(kind) = registry.get(pos) else {
            continue;
        };

        let proposal = if navigator.is_target(pos) {
            directed_step(grid, registry, navigator, pos, player)
        } else {
            random_step(grid, registry, pos, player, rng)
        };
        let Some(to) = proposal else {
            continue;
        };

        if to == player {
            registry.remove(pos);
            if navigator.is_target(pos) {
                navigator.reset();
            }
            debug!("{:?} at {:?} reached the player", kind, pos);
            handler.on_encounter(kind);
            report.encounters.push(kind);
            report.changed.insert(pos);
        } else if registry.move_entity(pos, to) {
            navigator.follow(pos, to);
            report.changed.insert(pos);
            report.changed.insert(to);
        }
    }

    report
}

/// Next path step for the pursuer.
///
/// A step that is no longer adjacent or has been taken by another entity
/// invalidates the rest of the path; the pursuer then waits for the next
/// reevaluation. An empty path also means standing still.
fn directed_step(
    grid: &GridMap,
    registry: &EntityRegistry,
    navigator: &mut NavigatorState,
    pos: Position,
    player: Position,
) -> Option<Position> {
    let step = navigator.pop_step()?;
    let enterable = step == player || (grid.is_walkable(step) && !registry.is_occupied(step));

    if Direction::from_delta(step - pos).is_some() && enterable {
        Some(step)
    } else {
        navigator.clear_path();
        None
    }
}

/// Random wandering step.
///
/// The four directions are tried in shuffled order and the first walkable
/// tile that is free, or is the player's, is taken. Other entities are never
/// stepped on.
fn random_step(
    grid: &GridMap,
    registry: &EntityRegistry,
    pos: Position,
    player: Position,
    rng: &mut StdRng,
) -> Option<Position> {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    directions
        .into_iter()
        .map(|direction| pos + direction.to_delta())
        .find(|&next| grid.is_walkable(next) && (next == player || !registry.is_occupied(next)))
}
