//! # World Representation
//!
//! The fixed-size tile grid a wave is played on.

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// One cell of the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Ground,
}

impl Tile {
    /// Character used for the tile in text dumps.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Ground => ' ',
        }
    }
}

/// Rectangular tile grid stored as a flat row-major buffer.
///
/// Once a generator hands a grid out it is only read; a new wave builds a new
/// grid instead of editing the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl GridMap {
    /// Creates a grid filled with `fill`.
    pub fn filled(width: u32, height: u32, fill: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; (width * height) as usize],
        }
    }

    /// Creates an all-ground grid with the outer ring walled off.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GridMap, Position, Tile};
    ///
    /// let grid = GridMap::bordered(10, 6);
    /// assert_eq!(grid.tile(Position::new(0, 3)), Some(Tile::Wall));
    /// assert_eq!(grid.tile(Position::new(4, 3)), Some(Tile::Ground));
    /// assert_eq!(grid.ground_count(), 8 * 4);
    /// ```
    pub fn bordered(width: u32, height: u32) -> Self {
        let mut grid = Self::filled(width, height, Tile::Ground);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pos = Position::new(x, y);
                if grid.is_border(pos) {
                    grid.set_tile(pos, Tile::Wall);
                }
            }
        }
        grid
    }

    /// Parses a grid from rows of `#` (wall) and anything else (ground).
    ///
    /// Rows shorter than the first are padded with walls. Intended for tests
    /// and debugging fixtures.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let mut grid = Self::filled(width, height, Tile::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(width as usize).enumerate() {
                if ch != '#' {
                    grid.set_tile(Position::new(x as i32, y as i32), Tile::Ground);
                }
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks if a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major buffer offset of an in-bounds position.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Position stored at a buffer offset.
    pub fn position_of(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Gets the tile at a position, or None outside the grid.
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.index_of(pos).map(|index| self.tiles[index])
    }

    /// Overwrites a tile. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(index) = self.index_of(pos) {
            self.tiles[index] = tile;
        }
    }

    pub fn tile_at_index(&self, index: usize) -> Tile {
        self.tiles[index]
    }

    pub fn set_tile_at_index(&mut self, index: usize, tile: Tile) {
        self.tiles[index] = tile;
    }

    /// True iff the position is inside the grid and holds ground.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos) == Some(Tile::Ground)
    }

    /// Whether the position is on the outermost ring.
    pub fn is_border(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as u32 == self.width - 1
                || pos.y as u32 == self.height - 1)
    }

    /// Number of ground tiles on the whole grid.
    pub fn ground_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == Tile::Ground).count()
    }

    /// All ground tiles in row-major order.
    pub fn ground_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile == Tile::Ground)
            .map(|(index, _)| self.position_of(index))
            .collect()
    }

    /// Renders the bare terrain, one string per row.
    pub fn to_ascii(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|tile| tile.glyph()).collect())
            .collect()
    }
}

/// Checks whether an entity standing anywhere may step onto `pos`.
pub fn can_move(pos: Position, grid: &GridMap) -> bool {
    grid.is_walkable(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bordered_grid_has_wall_ring() {
        let grid = GridMap::bordered(12, 7);
        for x in 0..12 {
            assert_eq!(grid.tile(Position::new(x, 0)), Some(Tile::Wall));
            assert_eq!(grid.tile(Position::new(x, 6)), Some(Tile::Wall));
        }
        for y in 0..7 {
            assert_eq!(grid.tile(Position::new(0, y)), Some(Tile::Wall));
            assert_eq!(grid.tile(Position::new(11, y)), Some(Tile::Wall));
        }
        assert_eq!(grid.ground_count(), 10 * 5);
    }

    #[test]
    fn test_walkability_outside_bounds() {
        let grid = GridMap::filled(5, 5, Tile::Ground);
        assert!(grid.is_walkable(Position::new(0, 0)));
        assert!(!grid.is_walkable(Position::new(-1, 2)));
        assert!(!grid.is_walkable(Position::new(2, 5)));
        assert!(!grid.is_walkable(Position::new(5, 2)));
    }

    #[test]
    fn test_index_round_trip() {
        let grid = GridMap::bordered(8, 4);
        let pos = Position::new(3, 2);
        let index = grid.index_of(pos).unwrap();
        assert_eq!(index, 2 * 8 + 3);
        assert_eq!(grid.position_of(index), pos);
        assert_eq!(grid.index_of(Position::new(8, 0)), None);
    }

    #[test]
    fn test_from_rows() {
        let grid = GridMap::from_rows(&["#####", "#  ##", "#####"]);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(
            grid.ground_positions(),
            vec![Position::new(1, 1), Position::new(2, 1)]
        );
        assert_eq!(grid.to_ascii()[1], "#  ##");
    }

    #[test]
    fn test_can_move_rejects_walls() {
        let grid = GridMap::bordered(5, 5);
        assert!(can_move(Position::new(2, 2), &grid));
        assert!(!can_move(Position::new(0, 2), &grid));
        assert!(!can_move(Position::new(9, 9), &grid));
    }
}
