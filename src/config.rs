//! Puzzle configuration as embedded by the server
//!
//! The page receives `{"grid": [[0, 1], [1, 9]], "start": [0, 0]}`. A missing
//! `start` means the top-left cell.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{Grid, Position};

/// Raw puzzle configuration, validated by [`PuzzleConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default)]
    pub grid: Vec<Vec<i64>>,
    /// `[row, col]`
    #[serde(default)]
    pub start: Option<Vec<i64>>,
}

impl PuzzleConfig {
    pub fn new(grid: Vec<Vec<i64>>, start: [i64; 2]) -> Self {
        Self {
            grid,
            start: Some(start.to_vec()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the grid shape and start cell
    pub fn validate(&self) -> Result<(Grid, Position), ConfigError> {
        let grid = Grid::from_codes(&self.grid)?;

        let (row, col) = match self.start.as_deref() {
            None => (0, 0),
            Some(&[row, col]) => (row, col),
            Some(_) => return Err(ConfigError::MalformedStart),
        };
        let start = grid
            .position(row, col)
            .ok_or(ConfigError::StartOutOfBounds {
                row,
                col,
                rows: grid.rows(),
                cols: grid.cols(),
            })?;

        Ok((grid, start))
    }
}

/// Built-in puzzle used by the native runner when no file is given.
/// Solved only with both colors flipped.
pub fn demo() -> PuzzleConfig {
    PuzzleConfig::new(
        vec![
            vec![0, 0, 8, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 2, 0, 2, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 0, 9, 0],
        ],
        [0, 2],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_with_start() {
        let config = PuzzleConfig::from_json(r#"{"grid": [[0,1],[1,9]], "start": [0,0]}"#).unwrap();
        let (grid, start) = config.validate().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(start, Position::new(0, 0));
    }

    #[test]
    fn test_missing_start_defaults_to_origin() {
        let config = PuzzleConfig::from_json(r#"{"grid": [[0,0],[0,9]]}"#).unwrap();
        let (_, start) = config.validate().unwrap();
        assert_eq!(start, Position::new(0, 0));
    }

    #[test]
    fn test_missing_grid_is_empty() {
        let config = PuzzleConfig::from_json("{}").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid)));
    }

    #[test]
    fn test_bad_start_rejected() {
        let config = PuzzleConfig::new(vec![vec![0, 0]], [1, 0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { row: 1, col: 0, .. })
        ));

        let config = PuzzleConfig::new(vec![vec![0, 0]], [0, -1]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { .. })
        ));

        let config = PuzzleConfig {
            grid: vec![vec![0]],
            start: Some(vec![0]),
        };
        assert!(matches!(config.validate(), Err(ConfigError::MalformedStart)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PuzzleConfig::from_json("{\"grid\": 3}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_demo_is_valid() {
        let (grid, start) = demo().validate().unwrap();
        assert_eq!(grid.cols(), 5);
        assert_eq!(start, Position::new(0, 2));
    }
}
