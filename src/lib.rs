//! Gravity Architect - grid ball-drop puzzle stage
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, puzzle state, tick rules)
//! - `engine`: Run state machine that turns commands into host effects
//! - `view`: Pure board description for rendering
//! - `config`: Puzzle configuration as delivered by the server
//! - `settings`: Engine tuning (timings, answer token, messages)
//! - `platform`: Headless and browser hosts that apply engine effects

pub mod config;
pub mod engine;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod view;

pub use config::PuzzleConfig;
pub use engine::{Command, Effect, Engine};
pub use error::ConfigError;
pub use settings::EngineSettings;

/// Game configuration constants
pub mod consts {
    /// Interval between simulation ticks
    pub const TICK_INTERVAL_MS: u32 = 500;
    /// Delay before the ball returns to start after falling off the board
    pub const FAILURE_RESET_DELAY_MS: u32 = 1500;

    /// Value written to the answer field when the ball reaches the goal
    pub const SUCCESS_TOKEN: &str = "NEWTON";
    pub const SUCCESS_MESSAGE: &str = "GOAL!! Press the ANSWER button!";
    pub const FAILURE_MESSAGE: &str = "Failed... The star is lost.";

    /// Edge length of a rendered tile in CSS pixels
    pub const TILE_SIZE_PX: u32 = 60;
}
