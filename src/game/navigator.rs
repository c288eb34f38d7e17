//! # Navigator
//!
//! Hostile pursuit: picks which hostile chases the player, decides whether it
//! can see the player, and plans its route with A*.
//!
//! There is exactly one pursuer at a time. [`NavigatorState`] holds a single
//! target and a single path for the whole hostile population; everyone else
//! wanders (see [`crate::game::movement`]).

use crate::game::{EntityRegistry, GridMap, Position};
use crate::utils::{find_path, has_line_of_sight};
use log::debug;
use std::collections::VecDeque;

/// Shared pursuit state, carried across hostile ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    /// Tile of the hostile currently pursuing the player
    pub current_target: Option<Position>,
    /// Remaining steps for the pursuer, next step first
    pub current_path: VecDeque<Position>,
    /// Ticks since the target was last chosen
    pub step_counter: u32,
    /// Ticks after which the target is chosen again
    pub reeval_interval: u32,
}

/// Result of a target scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetChoice {
    /// Where the chosen hostile stands
    pub position: Position,
    /// Manhattan distance to the player
    pub distance: u32,
    /// Whether the hostile has line of sight to the player
    pub visible: bool,
}

impl NavigatorState {
    /// Creates a navigator with no target.
    pub fn new(reeval_interval: u32) -> Self {
        Self {
            current_target: None,
            current_path: VecDeque::new(),
            step_counter: 0,
            reeval_interval,
        }
    }

    pub fn has_target(&self) -> bool {
        self.current_target.is_some()
    }

    /// Forgets the target and its path.
    pub fn reset(&mut self) {
        self.current_target = None;
        self.current_path.clear();
    }

    /// Checks whether the next tick has to pick a target again.
    pub fn needs_reevaluation(&self, registry: &EntityRegistry) -> bool {
        match self.current_target {
            None => true,
            Some(target) => {
                self.step_counter >= self.reeval_interval
                    || !registry.get(target).is_some_and(|kind| kind.is_hostile())
            }
        }
    }

    /// Advances the navigator by one hostile tick.
    ///
    /// Re-acquires a target and replans when there is none, when the interval
    /// has elapsed, or when the tracked hostile is gone. Otherwise the
    /// existing path keeps being consumed.
    pub fn tick(&mut self, grid: &GridMap, registry: &EntityRegistry, player: Position) {
        self.step_counter += 1;
        if self.needs_reevaluation(registry) {
            self.acquire_target(grid, registry, player);
        }
    }

    /// Chooses the pursuer and plans its path to the player.
    ///
    /// Returns the new target, or None (with the state reset) when no hostile
    /// is left.
    pub fn acquire_target(
        &mut self,
        grid: &GridMap,
        registry: &EntityRegistry,
        player: Position,
    ) -> Option<Position> {
        let Some(choice) = select_target(grid, registry, player) else {
            self.reset();
            return None;
        };

        let path = find_path(grid, choice.position, player, |pos| registry.is_occupied(pos));
        debug!(
            "Pursuer at {:?} ({} tiles, {}), path of {} steps",
            choice.position,
            choice.distance,
            if choice.visible { "visible" } else { "hidden" },
            path.len()
        );

        self.current_target = Some(choice.position);
        self.current_path = path.into();
        self.step_counter = 0;
        self.current_target
    }

    /// Whether the entity on `pos` is the pursuer.
    pub fn is_target(&self, pos: Position) -> bool {
        self.current_target == Some(pos)
    }

    /// Takes the pursuer's next step off the front of the path.
    pub fn pop_step(&mut self) -> Option<Position> {
        self.current_path.pop_front()
    }

    /// Drops the remaining path but keeps the target.
    pub fn clear_path(&mut self) {
        self.current_path.clear();
    }

    /// Keeps tracking the pursuer after it moved from `from` to `to`.
    pub fn follow(&mut self, from: Position, to: Position) {
        if self.current_target == Some(from) {
            self.current_target = Some(to);
        }
    }
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REEVAL_INTERVAL)
    }
}

/// Picks the hostile that should pursue the player.
///
/// Hostiles with line of sight to the player are preferred; among them the
/// nearest by Manhattan distance wins. Without any visible hostile the nearest
/// hidden one is chosen. Equal distances resolve to the first hostile in
/// row-major order.
pub fn select_target(
    grid: &GridMap,
    registry: &EntityRegistry,
    player: Position,
) -> Option<TargetChoice> {
    let (visible, hidden): (Vec<TargetChoice>, Vec<TargetChoice>) = registry
        .hostiles()
        .into_iter()
        .map(|(position, _)| TargetChoice {
            position,
            distance: position.manhattan_distance(player),
            visible: has_line_of_sight(grid, position, player),
        })
        .partition(|choice| choice.visible);

    let nearest = |choices: Vec<TargetChoice>| {
        choices
            .into_iter()
            .min_by_key(|c| (c.distance, c.position))
    };
    nearest(visible).or_else(|| nearest(hidden))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EntityKind, Tile};

    fn registry_with(player: Position, hostiles: &[(Position, EntityKind)]) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.insert(player, EntityKind::Player);
        for &(pos, kind) in hostiles {
            registry.insert(pos, kind);
        }
        registry
    }

    #[test]
    fn test_navigator_creation() {
        let navigator = NavigatorState::new(5);
        assert!(!navigator.has_target());
        assert!(navigator.current_path.is_empty());
        assert_eq!(navigator.step_counter, 0);
    }

    #[test]
    fn test_prefers_visible_over_nearer_hidden() {
        let mut grid = GridMap::bordered(12, 10);
        grid.set_tile(Position::new(2, 3), Tile::Wall);
        let player = Position::new(2, 5);
        let registry = registry_with(
            player,
            &[
                (Position::new(2, 2), EntityKind::Enemy),
                (Position::new(8, 5), EntityKind::Boss),
            ],
        );

        let choice = select_target(&grid, &registry, player).unwrap();
        assert_eq!(choice.position, Position::new(8, 5));
        assert!(choice.visible);
    }

    #[test]
    fn test_falls_back_to_nearest_hidden() {
        let mut grid = GridMap::bordered(12, 10);
        grid.set_tile(Position::new(2, 3), Tile::Wall);
        let player = Position::new(2, 5);
        let registry = registry_with(player, &[(Position::new(2, 2), EntityKind::Enemy)]);

        assert!(!has_line_of_sight(&grid, Position::new(2, 2), player));
        let choice = select_target(&grid, &registry, player).unwrap();
        assert_eq!(choice.position, Position::new(2, 2));
        assert!(!choice.visible);
        assert_eq!(choice.distance, 3);
    }

    #[test]
    fn test_merchants_are_never_targets() {
        let grid = GridMap::bordered(10, 10);
        let player = Position::new(1, 1);
        let registry = registry_with(player, &[(Position::new(2, 1), EntityKind::Merchant)]);
        assert_eq!(select_target(&grid, &registry, player), None);
    }

    #[test]
    fn test_acquire_plans_path_to_player() {
        let grid = GridMap::bordered(12, 6);
        let player = Position::new(8, 2);
        let registry = registry_with(player, &[(Position::new(2, 2), EntityKind::MiniBoss)]);
        let mut navigator = NavigatorState::new(10);

        assert_eq!(
            navigator.acquire_target(&grid, &registry, player),
            Some(Position::new(2, 2))
        );
        assert_eq!(navigator.current_path.len(), 6);
        assert_eq!(navigator.current_path.back(), Some(&player));
    }

    #[test]
    fn test_reevaluates_after_interval() {
        let grid = GridMap::bordered(12, 6);
        let player = Position::new(8, 2);
        let registry = registry_with(player, &[(Position::new(2, 2), EntityKind::Enemy)]);
        let mut navigator = NavigatorState::new(3);

        navigator.tick(&grid, &registry, player);
        assert_eq!(navigator.step_counter, 0);
        navigator.tick(&grid, &registry, player);
        navigator.tick(&grid, &registry, player);
        assert_eq!(navigator.step_counter, 2);
        assert!(!navigator.needs_reevaluation(&registry));

        navigator.tick(&grid, &registry, player);
        assert_eq!(navigator.step_counter, 0);
    }

    #[test]
    fn test_reevaluates_when_target_disappears() {
        let grid = GridMap::bordered(12, 6);
        let player = Position::new(8, 2);
        let mut registry = registry_with(
            player,
            &[
                (Position::new(2, 2), EntityKind::Enemy),
                (Position::new(2, 4), EntityKind::Enemy),
            ],
        );
        let mut navigator = NavigatorState::new(100);
        navigator.tick(&grid, &registry, player);
        assert_eq!(navigator.current_target, Some(Position::new(2, 2)));

        registry.remove(Position::new(2, 2));
        assert!(navigator.needs_reevaluation(&registry));
        navigator.tick(&grid, &registry, player);
        assert_eq!(navigator.current_target, Some(Position::new(2, 4)));
    }

    #[test]
    fn test_no_hostiles_clears_target() {
        let grid = GridMap::bordered(8, 8);
        let player = Position::new(1, 1);
        let registry = registry_with(player, &[]);
        let mut navigator = NavigatorState::new(4);
        navigator.current_target = Some(Position::new(3, 3));
        navigator.current_path.push_back(Position::new(3, 2));

        navigator.tick(&grid, &registry, player);
        assert!(!navigator.has_target());
        assert!(navigator.current_path.is_empty());
    }

    #[test]
    fn test_follow_only_tracks_target() {
        let mut navigator = NavigatorState::new(4);
        navigator.current_target = Some(Position::new(3, 3));
        navigator.follow(Position::new(5, 5), Position::new(5, 6));
        assert_eq!(navigator.current_target, Some(Position::new(3, 3)));
        navigator.follow(Position::new(3, 3), Position::new(3, 4));
        assert!(navigator.is_target(Position::new(3, 4)));
    }
}
