//! Deterministic simulation module
//!
//! All puzzle rules live here. This module must stay pure:
//! - One row per tick, no wall clock
//! - Flags read only when a tick runs
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{Grid, TileKind};
pub use state::{FailureCause, FlipFlags, Outcome, Position, PuzzleState, RunPhase};
pub use tick::{Step, TickOutcome, next_step, tick};
