//! Puzzle state and core simulation types

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::error::ConfigError;

/// A cell on the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Deflection flip toggles, one per slope color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlipFlags {
    pub red_flipped: bool,
    pub blue_flipped: bool,
}

/// Why a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    /// The next cell (row, col) lies outside the grid
    OutOfBounds { row: i64, col: i64 },
}

/// Terminal result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure(FailureCause),
}

/// Current phase of the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for a start command
    #[default]
    Idle,
    /// Ball falls one row per tick
    Running,
    /// Run ended; only a new start leaves this phase (or the failure reset)
    Finished(Outcome),
}

/// Complete puzzle state (deterministic, serializable).
/// Only built through [`PuzzleState::new`], which checks the start cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleState {
    pub grid: Grid,
    pub start: Position,
    pub ball: Position,
    pub flags: FlipFlags,
    pub phase: RunPhase,
    /// Ticks applied during the current run
    pub run_ticks: u32,
}

impl PuzzleState {
    /// Create an idle puzzle with the ball on the start cell
    pub fn new(grid: Grid, start: Position) -> Result<Self, ConfigError> {
        if start.row >= grid.rows() || start.col >= grid.cols() {
            return Err(ConfigError::StartOutOfBounds {
                row: start.row as i64,
                col: start.col as i64,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        Ok(Self {
            grid,
            start,
            ball: start,
            flags: FlipFlags::default(),
            phase: RunPhase::Idle,
            run_ticks: 0,
        })
    }

    /// Put the ball back on the start cell
    pub fn reset_ball(&mut self) {
        self.ball = self.start;
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}
