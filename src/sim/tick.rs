//! Fixed tick simulation
//!
//! One tick moves the ball exactly one row down. The tile the ball currently
//! sits on decides the column offset, using the flip flags as they are when
//! the tick runs.

use super::grid::{Grid, TileKind};
use super::state::{FailureCause, FlipFlags, Outcome, Position, PuzzleState, RunPhase};

/// Where the ball goes from a given cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Next cell is on the board
    Move(Position),
    /// Next cell (row, col) is off the board
    OffBoard { row: i64, col: i64 },
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Ignored,
    /// Ball moved to a non-goal cell
    Moved(Position),
    /// Ball moved onto a goal cell; run finished with success
    ReachedGoal(Position),
    /// Ball left the board; run finished with failure, ball not moved
    Fell(FailureCause),
}

/// Column offset a tile applies under the given flags
pub fn deflection(kind: TileKind, flags: FlipFlags) -> i64 {
    match kind {
        TileKind::Red if flags.red_flipped => 1,
        TileKind::Red => -1,
        TileKind::Blue if flags.blue_flipped => -1,
        TileKind::Blue => 1,
        _ => 0,
    }
}

/// Compute the next cell from `from` without touching any state
pub fn next_step(grid: &Grid, flags: FlipFlags, from: Position) -> Step {
    let row = from.row as i64 + 1;
    let col = from.col as i64 + deflection(grid.tile(from), flags);
    match grid.position(row, col) {
        Some(pos) => Step::Move(pos),
        None => Step::OffBoard { row, col },
    }
}

/// Advance a running puzzle by one tick
pub fn tick(state: &mut PuzzleState) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Ignored;
    }

    match next_step(&state.grid, state.flags, state.ball) {
        Step::OffBoard { row, col } => {
            let cause = FailureCause::OutOfBounds { row, col };
            state.phase = RunPhase::Finished(Outcome::Failure(cause));
            TickOutcome::Fell(cause)
        }
        Step::Move(pos) => {
            state.ball = pos;
            state.run_ticks += 1;
            if state.grid.tile(pos) == TileKind::Goal {
                state.phase = RunPhase::Finished(Outcome::Success);
                TickOutcome::ReachedGoal(pos)
            } else {
                TickOutcome::Moved(pos)
            }
        }
    }
}
