//! Immutable puzzle grid
//!
//! Tiles are stored row-major. The grid is validated once on construction,
//! so every lookup through a [`Position`] that passed [`Grid::contains`] is
//! in range.

use serde::{Deserialize, Serialize};

use super::state::Position;
use crate::error::ConfigError;

/// Behaviour of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Code 0: straight fall
    Empty,
    /// Code 1: deflects left, right when flipped
    Red,
    /// Code 2: deflects right, left when flipped
    Blue,
    /// Code 8: decorative start marker, falls straight
    Start,
    /// Code 9: reaching it finishes the run
    Goal,
    /// Any other code; treated as a plain tile
    Other(i64),
}

impl TileKind {
    pub const EMPTY: i64 = 0;
    pub const RED: i64 = 1;
    pub const BLUE: i64 = 2;
    pub const START: i64 = 8;
    pub const GOAL: i64 = 9;

    pub fn from_code(code: i64) -> Self {
        match code {
            Self::EMPTY => TileKind::Empty,
            Self::RED => TileKind::Red,
            Self::BLUE => TileKind::Blue,
            Self::START => TileKind::Start,
            Self::GOAL => TileKind::Goal,
            other => TileKind::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            TileKind::Empty => Self::EMPTY,
            TileKind::Red => Self::RED,
            TileKind::Blue => Self::BLUE,
            TileKind::Start => Self::START,
            TileKind::Goal => Self::GOAL,
            TileKind::Other(code) => *code,
        }
    }
}

/// Rectangular, non-empty tile grid.
///
/// Serialized as its row-major tile codes; deserializing runs the same
/// validation as [`Grid::from_codes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Build a grid from row-major tile codes.
    ///
    /// Rejects an empty grid, an empty first row, and rows whose length
    /// differs from row 0.
    pub fn from_codes(codes: &[Vec<i64>]) -> Result<Self, ConfigError> {
        let cols = codes.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(codes.len() * cols);
        for (row, line) in codes.iter().enumerate() {
            if line.len() != cols {
                return Err(ConfigError::RaggedGrid {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for &code in line {
                let kind = TileKind::from_code(code);
                if let TileKind::Other(code) = kind {
                    log::warn!("Unknown tile code {} in row {}, treating as plain", code, row);
                }
                tiles.push(kind);
            }
        }

        Ok(Self {
            rows: codes.len(),
            cols,
            tiles,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if (row, col) addresses a cell of this grid
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Tile at an in-bounds position
    pub fn tile(&self, pos: Position) -> TileKind {
        self.tiles[pos.row * self.cols + pos.col]
    }

    /// Checked conversion of signed coordinates into a position on this grid
    pub fn position(&self, row: i64, col: i64) -> Option<Position> {
        self.contains(row, col)
            .then(|| Position::new(row as usize, col as usize))
    }

    /// Tile codes, one `Vec` per row
    pub fn codes(&self) -> Vec<Vec<i64>> {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(TileKind::code).collect())
            .collect()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, TileKind)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, kind)| (Position::new(i / self.cols, i % self.cols), *kind))
    }
}

impl TryFrom<Vec<Vec<i64>>> for Grid {
    type Error = ConfigError;

    fn try_from(codes: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Self::from_codes(&codes)
    }
}

impl From<Grid> for Vec<Vec<i64>> {
    fn from(grid: Grid) -> Self {
        grid.codes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codes_maps_tile_kinds() {
        let grid = Grid::from_codes(&[vec![0, 1, 2], vec![8, 9, 5]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.tile(Position::new(0, 1)), TileKind::Red);
        assert_eq!(grid.tile(Position::new(0, 2)), TileKind::Blue);
        assert_eq!(grid.tile(Position::new(1, 0)), TileKind::Start);
        assert_eq!(grid.tile(Position::new(1, 1)), TileKind::Goal);
        assert_eq!(grid.tile(Position::new(1, 2)), TileKind::Other(5));
        assert_eq!(TileKind::Other(5).code(), 5);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(Grid::from_codes(&[]), Err(ConfigError::EmptyGrid)));
        assert!(matches!(
            Grid::from_codes(&[vec![]]),
            Err(ConfigError::EmptyGrid)
        ));
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let err = Grid::from_codes(&[vec![0, 0], vec![0], vec![0, 0]]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_contains_and_position() {
        let grid = Grid::from_codes(&[vec![0, 0], vec![0, 0]]).unwrap();
        assert!(grid.contains(1, 1));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, 2));
        assert!(!grid.contains(2, 0));
        assert_eq!(grid.position(1, 0), Some(Position::new(1, 0)));
        assert_eq!(grid.position(0, -1), None);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::from_codes(&[vec![0, 1], vec![2, 9]]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], (Position::new(0, 1), TileKind::Red));
        assert_eq!(cells[2], (Position::new(1, 0), TileKind::Blue));
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let grid: Grid = serde_json::from_str("[[0, 1], [2, 9]]").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.tile(Position::new(1, 1)), TileKind::Goal);
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[[0,1],[2,9]]");

        assert!(serde_json::from_str::<Grid>("[[0, 0], [0]]").is_err());
        assert!(serde_json::from_str::<Grid>("[]").is_err());
    }

    #[test]
    fn test_deserialize_rejects_raw_fields() {
        let json = r#"{"rows":3,"cols":1,"tiles":["Empty"]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }
}
