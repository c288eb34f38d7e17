//! # Game Module
//!
//! Core simulation state: the tile grid, the entity registry, hostile
//! navigation and per-tick movement resolution.
//!
//! This module contains the fundamental building blocks of a wave:
//! - Grid representation and walkability queries
//! - Position-indexed entity registry
//! - Shared pursuit state and pathfinding-driven navigation
//! - Movement resolution with encounter detection

pub mod entities;
pub mod movement;
pub mod navigator;
pub mod state;
pub mod world;

pub use entities::*;
pub use movement::*;
pub use navigator::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Represents a 2D coordinate on the level grid.
///
/// Positions order row-major, by `y` first and then `x`, which is the order
/// the renderer redraws cells in.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// assert!(Position::new(79, 0) < Position::new(0, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the 4 cardinal adjacent positions in N, S, E, W order.
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        Direction::ALL.map(|direction| self + direction.to_delta())
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal directions for movement. Diagonal steps do not exist on this grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in the fixed order neighbours are expanded.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta is not a single cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

/// The kinds of entity that can occupy a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Merchant,
    Boss,
    MiniBoss,
}

impl EntityKind {
    /// Whether the navigator may pick this kind as its pursuer.
    pub fn is_hostile(self) -> bool {
        matches!(self, EntityKind::Enemy | EntityKind::Boss | EntityKind::MiniBoss)
    }

    /// Single-character glyph used by text dumps.
    pub fn glyph(self) -> char {
        match self {
            EntityKind::Player => 'P',
            EntityKind::Enemy => 'E',
            EntityKind::Merchant => 'M',
            EntityKind::Boss => 'B',
            EntityKind::MiniBoss => 'b',
        }
    }

    /// Lowercase name shown in the message log.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Enemy => "enemy",
            EntityKind::Merchant => "merchant",
            EntityKind::Boss => "boss",
            EntityKind::MiniBoss => "miniboss",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
        assert_eq!(pos2.manhattan_distance(pos1), 7);
    }

    #[test]
    fn test_position_orders_row_major() {
        let mut positions = vec![
            Position::new(5, 2),
            Position::new(1, 3),
            Position::new(9, 1),
            Position::new(2, 2),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(9, 1),
                Position::new(2, 2),
                Position::new(5, 2),
                Position::new(1, 3),
            ]
        );
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(adjacent.len(), 4);
        assert!(adjacent.contains(&Position::new(5, 4)));
        assert!(adjacent.contains(&Position::new(4, 5)));
        assert!(!adjacent.contains(&Position::new(4, 4)));
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_delta_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_delta(direction.to_delta()), Some(direction));
        }
        assert_eq!(Direction::from_delta(Position::new(1, 1)), None);
    }

    #[test]
    fn test_hostile_kinds() {
        assert!(EntityKind::Enemy.is_hostile());
        assert!(EntityKind::Boss.is_hostile());
        assert!(EntityKind::MiniBoss.is_hostile());
        assert!(!EntityKind::Merchant.is_hostile());
        assert!(!EntityKind::Player.is_hostile());
    }
}
