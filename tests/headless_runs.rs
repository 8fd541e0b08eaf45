// Integration tests (native) for the `gravity-architect` crate.
// Full runs through the headless host with its virtual clock.

use gravity_architect::platform::HeadlessHost;
use gravity_architect::sim::{Outcome, Position, RunPhase};
use gravity_architect::view::StatusKind;
use gravity_architect::{Command, Engine, EngineSettings, PuzzleConfig, config};

fn scenario() -> (Engine, HeadlessHost) {
    let engine = Engine::initialize(
        &[vec![0, 0], vec![1, 0], vec![0, 9]],
        (0, 0),
        EngineSettings::default(),
    )
    .unwrap();
    let mut host = HeadlessHost::new();
    host.mount(&engine);
    (engine, host)
}

#[test]
fn falling_off_fails_then_resets_to_start() {
    let (mut engine, mut host) = scenario();
    host.send(&mut engine, Command::Start);

    host.advance(&mut engine, 500);
    assert_eq!(engine.ball(), Position::new(1, 0));

    host.advance(&mut engine, 500);
    assert!(matches!(engine.phase(), RunPhase::Finished(Outcome::Failure(_))));
    assert_eq!(host.active_tickers(), 0);
    assert_eq!(host.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
    assert_eq!(host.answer, None);
    assert!(host.start_enabled);

    // Failure message stays up for the reset delay
    host.advance(&mut engine, 1499);
    assert!(host.status.is_some());
    assert_eq!(engine.ball(), Position::new(1, 0));

    host.advance(&mut engine, 1);
    assert_eq!(engine.ball(), Position::new(0, 0));
    assert_eq!(engine.phase(), RunPhase::Idle);
    assert!(host.status.is_none());
    assert_eq!(
        host.last_frame.as_ref().and_then(|f| f.ball()),
        Some(Position::new(0, 0))
    );
}

#[test]
fn red_flip_before_start_reaches_goal() {
    let (mut engine, mut host) = scenario();
    host.send(&mut engine, Command::ToggleRed);
    host.send(&mut engine, Command::Start);

    let elapsed = host.run_until_settled(&mut engine, 10_000);
    assert_eq!(elapsed, 1000);
    assert_eq!(engine.ball(), Position::new(2, 1));
    assert_eq!(engine.phase(), RunPhase::Finished(Outcome::Success));
    assert_eq!(host.answer.as_deref(), Some("NEWTON"));
    let status = host.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "GOAL!! Press the ANSWER button!");
    assert_eq!(host.pending_resets(), 0);
}

#[test]
fn start_spam_creates_one_ticker() {
    let (mut engine, mut host) = scenario();
    for _ in 0..5 {
        host.send(&mut engine, Command::Start);
    }
    assert_eq!(host.active_tickers(), 1);
    assert_eq!(host.tickers_started, 1);
    assert_eq!(engine.run_id(), 1);

    host.advance(&mut engine, 500);
    host.send(&mut engine, Command::Start);
    assert_eq!(engine.ball(), Position::new(1, 0));
    assert_eq!(host.tickers_started, 1);
}

#[test]
fn toggle_while_running_steers_next_tick() {
    let (mut engine, mut host) = scenario();
    host.send(&mut engine, Command::Start);
    host.advance(&mut engine, 500);
    assert_eq!(engine.ball(), Position::new(1, 0));

    host.send(&mut engine, Command::ToggleRed);
    assert_eq!(engine.ball(), Position::new(1, 0));
    assert!(host.last_frame.as_ref().unwrap().tile(Position::new(1, 0)).unwrap().has_ball);

    host.advance(&mut engine, 500);
    assert_eq!(engine.phase(), RunPhase::Finished(Outcome::Success));
}

#[test]
fn quick_restart_is_not_reset_by_old_timer() {
    let (mut engine, mut host) = scenario();
    host.send(&mut engine, Command::Start);
    host.advance(&mut engine, 1000);
    assert!(matches!(engine.phase(), RunPhase::Finished(Outcome::Failure(_))));

    // Restart at 1000ms; the first run's reset is still due at 2500ms
    host.send(&mut engine, Command::Start);
    host.advance(&mut engine, 1000);
    assert!(matches!(engine.phase(), RunPhase::Finished(Outcome::Failure(_))));
    assert_eq!(host.pending_resets(), 2);

    host.advance(&mut engine, 600);
    assert_eq!(engine.ball(), Position::new(1, 0));
    assert!(host.status.is_some());

    host.advance(&mut engine, 900);
    assert_eq!(engine.ball(), Position::new(0, 0));
    assert_eq!(engine.phase(), RunPhase::Idle);
    assert!(host.status.is_none());
}

#[test]
fn failure_does_not_clear_previous_answer() {
    let (mut engine, mut host) = scenario();
    host.send(&mut engine, Command::ToggleRed);
    host.send(&mut engine, Command::Start);
    host.run_until_settled(&mut engine, 10_000);
    assert_eq!(host.answer.as_deref(), Some("NEWTON"));

    host.send(&mut engine, Command::ToggleRed);
    host.send(&mut engine, Command::Start);
    host.run_until_settled(&mut engine, 10_000);
    assert_eq!(engine.phase(), RunPhase::Idle);
    assert_eq!(host.answer.as_deref(), Some("NEWTON"));
    assert_eq!(engine.outcome_signal(), Some("NEWTON"));
}

#[test]
fn custom_settings_change_timing_and_token() {
    let settings = EngineSettings::from_json(
        r#"{"tick_interval_ms": 100, "reset_delay_ms": 250, "success_token": "APPLE"}"#,
    )
    .unwrap();
    let puzzle = PuzzleConfig::from_json(r#"{"grid": [[0],[0],[9]]}"#).unwrap();
    let mut engine = Engine::from_config(&puzzle, settings).unwrap();
    let mut host = HeadlessHost::new();
    host.send(&mut engine, Command::Start);

    assert_eq!(host.run_until_settled(&mut engine, 10_000), 200);
    assert_eq!(host.answer.as_deref(), Some("APPLE"));
}

#[test]
fn demo_needs_both_flips() {
    let play = |red: bool, blue: bool| {
        let mut engine = Engine::from_config(&config::demo(), EngineSettings::default()).unwrap();
        let mut host = HeadlessHost::new();
        if red {
            host.send(&mut engine, Command::ToggleRed);
        }
        if blue {
            host.send(&mut engine, Command::ToggleBlue);
        }
        host.send(&mut engine, Command::Start);
        host.advance(&mut engine, 3_000);
        engine.phase()
    };

    assert_eq!(play(true, true), RunPhase::Finished(Outcome::Success));
    assert!(matches!(play(false, false), RunPhase::Finished(Outcome::Failure(_))));
    assert!(matches!(play(true, false), RunPhase::Finished(Outcome::Failure(_))));
    assert!(matches!(play(false, true), RunPhase::Finished(Outcome::Failure(_))));
}
