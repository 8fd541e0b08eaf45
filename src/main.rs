//! Gravity Architect entry point
//!
//! On wasm32 this binds the engine to the stage page. Natively it plays a
//! puzzle headlessly and prints the board after every step.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo::events::EventListener;
    use gloo::timers::callback::Timeout;
    use wasm_bindgen::prelude::*;

    use gravity_architect::platform;
    use gravity_architect::platform::dom::{self, Page};
    use gravity_architect::{Command, ConfigError, Effect, Engine, EngineSettings};

    /// Game instance holding all state
    struct Game {
        engine: Engine,
        page: Page,
        /// Handle of the running `setInterval`, if any
        interval: Option<i32>,
        /// Tick callback, created once and reused for every run
        tick_fn: Option<js_sys::Function>,
    }

    impl Game {
        /// Apply a single effect that needs no new callbacks
        fn apply(&mut self, effect: &Effect) -> Result<(), ConfigError> {
            match effect {
                Effect::Render => {
                    let view = self.engine.render();
                    self.page.render_board(&view, self.engine.settings().tile_size_px)?;
                }
                Effect::StartTicker { interval_ms } => {
                    self.stop_interval();
                    let window = web_sys::window().ok_or(ConfigError::Host("no window".to_string()))?;
                    if let Some(tick_fn) = &self.tick_fn {
                        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
                            tick_fn,
                            platform::timer_delay(*interval_ms),
                        )?;
                        self.interval = Some(handle);
                    }
                }
                Effect::StopTicker => self.stop_interval(),
                Effect::WriteOutcome(value) => self.page.write_outcome(value),
                Effect::ShowStatus(message) => self.page.show_status(message)?,
                Effect::HideStatus => self.page.hide_status()?,
                Effect::SetStartEnabled(enabled) => self.page.set_start_enabled(*enabled),
                Effect::ScheduleReset { .. } => {}
            }
            Ok(())
        }

        fn stop_interval(&mut self) {
            if let Some(handle) = self.interval.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    /// Apply effects in order; the engine borrow is released before each one
    fn apply_effects(game: &Rc<RefCell<Game>>, effects: Vec<Effect>) {
        for effect in effects {
            if let Effect::ScheduleReset { delay_ms, run_id } = effect {
                let game = game.clone();
                Timeout::new(platform::timer_delay(delay_ms) as u32, move || {
                    let effects = game.borrow_mut().engine.reset_after_failure(run_id);
                    apply_effects(&game, effects);
                })
                .forget();
                continue;
            }
            if let Err(e) = game.borrow_mut().apply(&effect) {
                log::error!("Failed to apply {:?}: {}", effect, e);
            }
        }
    }

    fn send(game: &Rc<RefCell<Game>>, command: Command) {
        let effects = game.borrow_mut().engine.command(command);
        apply_effects(game, effects);
    }

    fn setup(game: &Rc<RefCell<Game>>) {
        // Tick callback
        {
            let g = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let effects = g.borrow_mut().engine.tick();
                apply_effects(&g, effects);
            });
            game.borrow_mut().tick_fn = Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
            closure.forget();
        }

        // Buttons
        let (red, blue, start) = {
            let g = game.borrow();
            (
                g.page.red_button.clone(),
                g.page.blue_button.clone(),
                g.page.start_button.clone(),
            )
        };
        for (target, command) in [
            (red.unchecked_into::<web_sys::EventTarget>(), Command::ToggleRed),
            (blue.unchecked_into::<web_sys::EventTarget>(), Command::ToggleBlue),
            (start.unchecked_into::<web_sys::EventTarget>(), Command::Start),
        ] {
            let game = game.clone();
            EventListener::new(&target, "click", move |_event| send(&game, command)).forget();
        }
    }

    fn init() -> Result<Rc<RefCell<Game>>, ConfigError> {
        let config = dom::load_puzzle_config()?;
        let settings = EngineSettings::load();
        let engine = Engine::from_config(&config, settings)?;
        let page = Page::bind()?;

        Ok(Rc::new(RefCell::new(Game {
            engine,
            page,
            interval: None,
            tick_fn: None,
        })))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Gravity Architect starting...");

        let game = match init() {
            Ok(game) => game,
            Err(e) => {
                log::error!("Stage setup failed: {}", e);
                return Err(JsValue::from_str(&e.to_string()));
            }
        };

        setup(&game);
        apply_effects(&game, vec![Effect::Render]);

        log::info!("Gravity Architect ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use gravity_architect::platform::HeadlessHost;
    use gravity_architect::sim::{Outcome, RunPhase};
    use gravity_architect::{Command, ConfigError, Engine, EngineSettings, PuzzleConfig, config};

    #[derive(Parser)]
    #[command(name = "gravity-architect", version, about = "Play a Gravity Architect puzzle headlessly")]
    pub struct Cli {
        /// Puzzle JSON (`{"grid": [[..]], "start": [r, c]}`); built-in demo if omitted
        config: Option<PathBuf>,
        /// Engine settings JSON
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Flip red slopes before starting
        #[arg(long)]
        flip_red: bool,
        /// Flip blue slopes before starting
        #[arg(long)]
        flip_blue: bool,
        /// Give up after this much simulated time
        #[arg(long, default_value_t = 60_000)]
        limit_ms: u64,
    }

    fn read(path: &Path) -> Result<String, ConfigError> {
        std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Host(format!("{}: {}", path.display(), e)))
    }

    pub fn run(cli: Cli) -> Result<RunPhase, ConfigError> {
        let puzzle = match &cli.config {
            Some(path) => PuzzleConfig::from_json(&read(path)?)?,
            None => {
                log::info!("No puzzle given, playing the demo");
                config::demo()
            }
        };
        let settings = match &cli.settings {
            Some(path) => EngineSettings::from_json(&read(path)?)?,
            None => EngineSettings::default(),
        };

        let mut engine = Engine::from_config(&puzzle, settings)?;
        let mut host = HeadlessHost::new().with_render_hook(Box::new(|frame, now| {
            println!("t={}ms\n{}", now, frame.to_text());
        }));

        if cli.flip_red {
            engine.toggle_red();
        }
        if cli.flip_blue {
            engine.toggle_blue();
        }
        host.mount(&engine);
        host.send(&mut engine, Command::Start);

        // Stop as soon as the run ends; the failure reset is not needed here
        let interval = u64::from(engine.settings().tick_interval_ms.max(1));
        let mut elapsed = 0;
        while engine.phase() == RunPhase::Running && elapsed < cli.limit_ms {
            host.advance(&mut engine, interval);
            elapsed += interval;
        }

        match engine.phase() {
            RunPhase::Finished(Outcome::Success) => println!(
                "GOAL! answer = {}",
                host.answer.as_deref().unwrap_or_default()
            ),
            RunPhase::Finished(Outcome::Failure(cause)) => println!("Failed: {:?}", cause),
            phase => println!("Gave up after {}ms in {:?}", elapsed, phase),
        }
        Ok(engine.phase())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    log::info!("Gravity Architect (native) starting...");

    match native::run(native::Cli::parse()) {
        Ok(_) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
