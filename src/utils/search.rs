//! # Grid Search
//!
//! Breadth-first connectivity counting and A* shortest paths over the
//! 4-connected ground graph, both built on the `pathfinding` crate.

use crate::game::{GridMap, Position};
use pathfinding::prelude::{astar, bfs_reach};

/// Counts ground tiles reachable from `start` with N/S/E/W steps.
///
/// `start` itself is included. A start that is not ground reaches nothing and
/// yields 0, which lets the level generator treat a walled-over spawn tile as
/// a disconnection.
///
/// # Examples
///
/// ```
/// use delve::{reachable_count, GridMap, Position};
///
/// let grid = GridMap::bordered(6, 5);
/// assert_eq!(reachable_count(&grid, Position::new(1, 1)), 4 * 3);
/// assert_eq!(reachable_count(&grid, Position::new(0, 0)), 0);
/// ```
pub fn reachable_count(grid: &GridMap, start: Position) -> usize {
    if !grid.is_walkable(start) {
        return 0;
    }

    bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(move |&next| grid.is_walkable(next))
    })
    .count()
}

/// Finds a shortest 4-directional path from `start` to `goal`.
///
/// Every step costs 1 and the heuristic is the Manhattan distance, which is
/// admissible and consistent here, so the result is optimal. A cell is
/// enterable when it is walkable and `is_blocked` says no; the goal is always
/// enterable so a path can end on an occupied tile.
///
/// The returned path excludes `start` and ends on `goal`. It is empty when
/// `start == goal` or no path exists.
///
/// # Examples
///
/// ```
/// use delve::{find_path, GridMap, Position};
///
/// let grid = GridMap::bordered(10, 5);
/// let path = find_path(&grid, Position::new(1, 1), Position::new(5, 1), |_| false);
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.last(), Some(&Position::new(5, 1)));
/// ```
pub fn find_path(
    grid: &GridMap,
    start: Position,
    goal: Position,
    is_blocked: impl Fn(Position) -> bool,
) -> Vec<Position> {
    let is_blocked = &is_blocked;

    let result = astar(
        &start,
        |pos: &Position| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(move |&next| {
                    grid.is_walkable(next) && (next == goal || !is_blocked(next))
                })
                .map(|next| (next, 1u32))
        },
        |pos: &Position| pos.manhattan_distance(goal),
        |pos: &Position| *pos == goal,
    );

    match result {
        Some((path, _cost)) => path.into_iter().skip(1).collect(),
        None => Vec::new(),
    }
}
