//! # Entity Registry
//!
//! Position-indexed storage for everything standing on the grid.

use crate::game::{EntityKind, Position};
use std::collections::HashMap;

/// Maps occupied tiles to the kind of entity standing there.
///
/// Keys are unique, so a tile never holds more than one entity. Lookups go
/// through the hash map; [`EntityRegistry::iter_row_major`] is the ordered
/// path for redraws. The registry also refuses a second player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    entities: HashMap<Position, EntityKind>,
    player: Option<Position>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entity, including the player.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.player = None;
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, pos: Position) -> Option<EntityKind> {
        self.entities.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.entities.contains_key(&pos)
    }

    /// Current player tile, if a player has been placed.
    pub fn player_position(&self) -> Option<Position> {
        self.player
    }

    /// Puts an entity on a free tile.
    ///
    /// Returns false and changes nothing when the tile is taken or when a
    /// second player is offered.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{EntityKind, EntityRegistry, Position};
    ///
    /// let mut registry = EntityRegistry::new();
    /// assert!(registry.insert(Position::new(2, 2), EntityKind::Enemy));
    /// assert!(!registry.insert(Position::new(2, 2), EntityKind::Boss));
    /// assert_eq!(registry.get(Position::new(2, 2)), Some(EntityKind::Enemy));
    /// ```
    pub fn insert(&mut self, pos: Position, kind: EntityKind) -> bool {
        if self.entities.contains_key(&pos) {
            return false;
        }
        if kind == EntityKind::Player {
            if self.player.is_some() {
                return false;
            }
            self.player = Some(pos);
        }
        self.entities.insert(pos, kind);
        true
    }

    /// Removes whatever stands on a tile.
    pub fn remove(&mut self, pos: Position) -> Option<EntityKind> {
        let kind = self.entities.remove(&pos)?;
        if kind == EntityKind::Player {
            self.player = None;
        }
        Some(kind)
    }

    /// Moves an entity to a free tile, keeping its kind.
    ///
    /// Returns false when there is nothing at `from` or `to` is occupied.
    pub fn move_entity(&mut self, from: Position, to: Position) -> bool {
        if from == to || self.entities.contains_key(&to) {
            return false;
        }
        let Some(kind) = self.entities.remove(&from) else {
            return false;
        };
        if kind == EntityKind::Player {
            self.player = Some(to);
        }
        self.entities.insert(to, kind);
        true
    }

    /// Unordered iteration over every entity.
    pub fn iter(&self) -> impl Iterator<Item = (Position, EntityKind)> + '_ {
        self.entities.iter().map(|(&pos, &kind)| (pos, kind))
    }

    /// Every entity sorted row-major, for redraws and deterministic scans.
    pub fn iter_row_major(&self) -> Vec<(Position, EntityKind)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(pos, _)| pos);
        entries
    }

    /// Positions of every non-player entity, row-major.
    pub fn non_player_positions(&self) -> Vec<Position> {
        self.iter_row_major()
            .into_iter()
            .filter(|&(_, kind)| kind != EntityKind::Player)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Hostile entities, row-major.
    pub fn hostiles(&self) -> Vec<(Position, EntityKind)> {
        self.iter_row_major()
            .into_iter()
            .filter(|&(_, kind)| kind.is_hostile())
            .collect()
    }

    /// Number of entities of one kind.
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|&&k| k == kind).count()
    }
}
