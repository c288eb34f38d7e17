//! # Grid Geometry
//!
//! Integer line rasterization and the line-of-sight test built on it.

use crate::game::{GridMap, Position};

/// Rasterizes the segment between two cells with Bresenham's algorithm.
///
/// Both endpoints are included, `from` first. Works in every octant.
///
/// # Examples
///
/// ```
/// use delve::{bresenham_line, Position};
///
/// let line = bresenham_line(Position::new(0, 0), Position::new(3, 1));
/// assert_eq!(line.first(), Some(&Position::new(0, 0)));
/// assert_eq!(line.last(), Some(&Position::new(3, 1)));
/// assert_eq!(line.len(), 4);
/// ```
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut x = from.x;
    let mut y = from.y;
    let mut err = dx + dy;

    loop {
        points.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

/// Casts a ray from `from` to `to` and reports whether it stays on ground.
///
/// The ray's own start cell is not tested, so an observer standing anywhere
/// can look out. Every later cell, the target included, must be walkable.
pub fn has_line_of_sight(grid: &GridMap, from: Position, to: Position) -> bool {
    bresenham_line(from, to)
        .into_iter()
        .skip(1)
        .all(|pos| grid.is_walkable(pos))
}
