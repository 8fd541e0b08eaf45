//! Run state machine for the grid puzzle
//!
//! The engine owns the puzzle state and never talks to a host directly. Every
//! command returns the [`Effect`]s the host must apply, in order. Hosts own
//! the actual timers; the engine only tracks whether one should be running,
//! so a second ticker can never be requested while one is active.

use crate::config::PuzzleConfig;
use crate::error::ConfigError;
use crate::settings::EngineSettings;
use crate::sim::{self, FlipFlags, Grid, Outcome, Position, PuzzleState, RunPhase, TickOutcome};
use crate::view::{self, BoardView, StatusKind, StatusMessage};

/// Host-side action requested by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Redraw the board from [`Engine::render`]
    Render,
    /// Begin calling [`Engine::tick`] every `interval_ms`
    StartTicker { interval_ms: u32 },
    /// Cancel the ticker immediately
    StopTicker,
    /// Call [`Engine::reset_after_failure`] with `run_id` after `delay_ms`
    ScheduleReset { delay_ms: u32, run_id: u64 },
    /// Set the answer field value
    WriteOutcome(String),
    ShowStatus(StatusMessage),
    HideStatus,
    /// Enable or disable the start control
    SetStartEnabled(bool),
}

/// User command from the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRed,
    ToggleBlue,
    Start,
}

/// Grid puzzle engine
#[derive(Debug, Clone)]
pub struct Engine {
    state: PuzzleState,
    settings: EngineSettings,
    /// Last value written to the answer field
    outcome_signal: Option<String>,
    status: Option<StatusMessage>,
    /// Bumped on every start; pending resets from older runs are ignored
    run_id: u64,
    ticker_active: bool,
}

impl Engine {
    /// Validate the grid and start cell and build an idle engine
    pub fn initialize(
        grid: &[Vec<i64>],
        start: (i64, i64),
        settings: EngineSettings,
    ) -> Result<Self, ConfigError> {
        let config = PuzzleConfig::new(grid.to_vec(), [start.0, start.1]);
        Self::from_config(&config, settings)
    }

    pub fn from_config(config: &PuzzleConfig, settings: EngineSettings) -> Result<Self, ConfigError> {
        let (grid, start) = config.validate()?;
        Self::new(grid, start, settings)
    }

    pub fn new(grid: Grid, start: Position, settings: EngineSettings) -> Result<Self, ConfigError> {
        let state = PuzzleState::new(grid, start)?;
        log::info!(
            "Puzzle ready: {}x{} grid, start ({}, {})",
            state.grid.rows(),
            state.grid.cols(),
            start.row,
            start.col
        );
        Ok(Self {
            state,
            settings,
            outcome_signal: None,
            status: None,
            run_id: 0,
            ticker_active: false,
        })
    }

    /// Dispatch a user command
    pub fn command(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::ToggleRed => self.toggle_red(),
            Command::ToggleBlue => self.toggle_blue(),
            Command::Start => self.start(),
        }
    }

    pub fn toggle_red(&mut self) -> Vec<Effect> {
        self.state.flags.red_flipped = !self.state.flags.red_flipped;
        log::debug!("Red flipped: {}", self.state.flags.red_flipped);
        vec![Effect::Render]
    }

    pub fn toggle_blue(&mut self) -> Vec<Effect> {
        self.state.flags.blue_flipped = !self.state.flags.blue_flipped;
        log::debug!("Blue flipped: {}", self.state.flags.blue_flipped);
        vec![Effect::Render]
    }

    /// Begin a new run. Ignored while a run is in progress.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.state.is_running() {
            log::debug!("Start ignored, run {} in progress", self.run_id);
            return Vec::new();
        }

        self.status = None;
        self.state.reset_ball();
        self.state.phase = RunPhase::Running;
        self.state.run_ticks = 0;
        self.run_id += 1;
        self.ticker_active = true;
        log::info!("Run {} started", self.run_id);

        vec![
            Effect::HideStatus,
            Effect::Render,
            Effect::SetStartEnabled(false),
            Effect::StartTicker {
                interval_ms: self.settings.tick_interval_ms,
            },
        ]
    }

    /// Advance one row. Ticks arriving outside a run do nothing.
    pub fn tick(&mut self) -> Vec<Effect> {
        match sim::tick(&mut self.state) {
            TickOutcome::Ignored => {
                log::debug!("Stale tick ignored");
                Vec::new()
            }
            TickOutcome::Moved(_) => vec![Effect::Render],
            TickOutcome::ReachedGoal(pos) => {
                let mut effects = self.stop_ticker();
                let token = self.settings.success_token.clone();
                let message = StatusMessage::new(&self.settings.success_message, StatusKind::Success);
                self.outcome_signal = Some(token.clone());
                self.status = Some(message.clone());
                log::info!(
                    "Run {} reached the goal at ({}, {}) after {} ticks",
                    self.run_id,
                    pos.row,
                    pos.col,
                    self.state.run_ticks
                );
                effects.extend([
                    Effect::Render,
                    Effect::WriteOutcome(token),
                    Effect::ShowStatus(message),
                ]);
                effects
            }
            TickOutcome::Fell(cause) => {
                let mut effects = self.stop_ticker();
                let message = StatusMessage::new(&self.settings.failure_message, StatusKind::Error);
                self.status = Some(message.clone());
                log::info!("Run {} failed: {:?}", self.run_id, cause);
                effects.extend([
                    Effect::ShowStatus(message),
                    Effect::ScheduleReset {
                        delay_ms: self.settings.reset_delay_ms,
                        run_id: self.run_id,
                    },
                ]);
                effects
            }
        }
    }

    /// Return the ball to start after a failed run and go back to idle.
    /// Ignored if `run_id` is not the failed run still on screen.
    pub fn reset_after_failure(&mut self, run_id: u64) -> Vec<Effect> {
        let failed = matches!(self.state.phase, RunPhase::Finished(Outcome::Failure(_)));
        if run_id != self.run_id || !failed {
            log::debug!("Stale reset for run {} ignored", run_id);
            return Vec::new();
        }

        self.state.reset_ball();
        self.state.phase = RunPhase::Idle;
        self.status = None;
        log::info!("Run {} reset to start", run_id);
        vec![Effect::Render, Effect::HideStatus]
    }

    /// Current board description
    pub fn render(&self) -> BoardView {
        view::render(&self.state)
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn ball(&self) -> Position {
        self.state.ball
    }

    pub fn flags(&self) -> FlipFlags {
        self.state.flags
    }

    pub fn outcome_signal(&self) -> Option<&str> {
        self.outcome_signal.as_deref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn ticker_active(&self) -> bool {
        self.ticker_active
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    fn stop_ticker(&mut self) -> Vec<Effect> {
        self.ticker_active = false;
        vec![Effect::StopTicker, Effect::SetStartEnabled(true)]
    }
}
