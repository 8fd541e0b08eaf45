//! Headless host with a virtual clock
//!
//! Applies engine effects to in-memory stand-ins for the page: an answer
//! field, a status area and a start button. Timers fire only when the clock
//! is advanced, so runs are fully deterministic.

use crate::engine::{Command, Effect, Engine};
use crate::view::{BoardView, StatusMessage};

/// Callback invoked after every render with the board and the current time
pub type RenderHook = Box<dyn FnMut(&BoardView, u64)>;

#[derive(Debug, Clone, Copy)]
struct Ticker {
    interval_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingReset {
    due_ms: u64,
    run_id: u64,
}

enum Due {
    Tick(usize),
    Reset(usize),
}

/// In-memory host driven by [`HeadlessHost::advance`]
pub struct HeadlessHost {
    now_ms: u64,
    tickers: Vec<Ticker>,
    resets: Vec<PendingReset>,
    /// Answer field value
    pub answer: Option<String>,
    /// Visible status message
    pub status: Option<StatusMessage>,
    pub start_enabled: bool,
    /// Total tickers ever started
    pub tickers_started: usize,
    pub renders: usize,
    pub last_frame: Option<BoardView>,
    render_hook: Option<RenderHook>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            tickers: Vec::new(),
            resets: Vec::new(),
            answer: None,
            status: None,
            start_enabled: true,
            tickers_started: 0,
            renders: 0,
            last_frame: None,
            render_hook: None,
        }
    }

    /// Call `hook` after every render
    pub fn with_render_hook(mut self, hook: RenderHook) -> Self {
        self.render_hook = Some(hook);
        self
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn active_tickers(&self) -> usize {
        self.tickers.len()
    }

    pub fn pending_resets(&self) -> usize {
        self.resets.len()
    }

    /// Draw the initial board
    pub fn mount(&mut self, engine: &Engine) {
        self.apply(engine, vec![Effect::Render]);
    }

    /// Deliver a user command and apply its effects
    pub fn send(&mut self, engine: &mut Engine, command: Command) {
        let effects = engine.command(command);
        self.apply(engine, effects);
    }

    /// Apply effects in order
    pub fn apply(&mut self, engine: &Engine, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render => {
                    let frame = engine.render();
                    self.renders += 1;
                    if let Some(hook) = self.render_hook.as_mut() {
                        hook(&frame, self.now_ms);
                    }
                    self.last_frame = Some(frame);
                }
                Effect::StartTicker { interval_ms } => {
                    if !self.tickers.is_empty() {
                        log::warn!("Ticker started while {} active", self.tickers.len());
                    }
                    let interval_ms = u64::from(interval_ms.max(1));
                    self.tickers.push(Ticker {
                        interval_ms,
                        next_due_ms: self.now_ms.saturating_add(interval_ms),
                    });
                    self.tickers_started += 1;
                }
                Effect::StopTicker => self.tickers.clear(),
                Effect::ScheduleReset { delay_ms, run_id } => {
                    self.resets.push(PendingReset {
                        due_ms: self.now_ms.saturating_add(u64::from(delay_ms)),
                        run_id,
                    });
                }
                Effect::WriteOutcome(value) => self.answer = Some(value),
                Effect::ShowStatus(message) => self.status = Some(message),
                Effect::HideStatus => self.status = None,
                Effect::SetStartEnabled(enabled) => self.start_enabled = enabled,
            }
        }
    }

    /// Advance the clock by `ms`, firing every timer that falls due
    pub fn advance(&mut self, engine: &mut Engine, ms: u64) {
        let until = self.now_ms.saturating_add(ms);
        while let Some((due_ms, due)) = self.next_due(until) {
            self.now_ms = due_ms;
            let effects = match due {
                Due::Tick(i) => {
                    let ticker = &mut self.tickers[i];
                    ticker.next_due_ms = ticker.next_due_ms.saturating_add(ticker.interval_ms);
                    engine.tick()
                }
                Due::Reset(i) => {
                    let reset = self.resets.remove(i);
                    engine.reset_after_failure(reset.run_id)
                }
            };
            self.apply(engine, effects);
        }
        self.now_ms = until;
    }

    /// Advance until no timer is pending or `limit_ms` has elapsed.
    /// Returns the elapsed time.
    pub fn run_until_settled(&mut self, engine: &mut Engine, limit_ms: u64) -> u64 {
        let started = self.now_ms;
        let deadline = started.saturating_add(limit_ms);
        while self.now_ms < deadline {
            let Some((due_ms, _)) = self.next_due(deadline) else {
                break;
            };
            self.advance(engine, due_ms - self.now_ms);
        }
        self.now_ms - started
    }

    fn next_due(&self, until: u64) -> Option<(u64, Due)> {
        let tick = self
            .tickers
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| t.next_due_ms)
            .map(|(i, t)| (t.next_due_ms, Due::Tick(i)));
        let reset = self
            .resets
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.due_ms)
            .map(|(i, r)| (r.due_ms, Due::Reset(i)));

        let next = match (tick, reset) {
            (Some(t), Some(r)) => Some(if r.0 < t.0 { r } else { t }),
            (t, r) => t.or(r),
        };
        next.filter(|(due_ms, _)| *due_ms <= until)
    }
}
