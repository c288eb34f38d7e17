//! # Text Dump
//!
//! Renders a grid and its occupants as rows of glyphs.

use crate::game::{EntityRegistry, GridMap, Position};

/// Renders the given rows of the level, entities drawn over terrain.
///
/// Walls are `#`, ground is a space, and entities use their kind's glyph.
pub fn render_rows(
    grid: &GridMap,
    registry: &EntityRegistry,
    rows: impl IntoIterator<Item = i32>,
) -> Vec<String> {
    rows.into_iter()
        .filter(|&y| y >= 0 && (y as u32) < grid.height())
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    let pos = Position::new(x, y);
                    match registry.get(pos) {
                        Some(kind) => kind.glyph(),
                        None => grid.tile(pos).map_or(' ', |tile| tile.glyph()),
                    }
                })
                .collect()
        })
        .collect()
}

/// Renders the whole level.
///
/// # Examples
///
/// ```
/// use delve::{render_ascii, EntityKind, EntityRegistry, GridMap, Position};
///
/// let grid = GridMap::bordered(5, 3);
/// let mut registry = EntityRegistry::new();
/// registry.insert(Position::new(1, 1), EntityKind::Player);
/// registry.insert(Position::new(3, 1), EntityKind::MiniBoss);
///
/// assert_eq!(render_ascii(&grid, &registry), vec!["#####", "#P b#", "#####"]);
/// ```
pub fn render_ascii(grid: &GridMap, registry: &EntityRegistry) -> Vec<String> {
    render_rows(grid, registry, 0..grid.height() as i32)
}
