//! Integration tests for the playback engine driven by the simulated backend
//!
//! A small host loop advances the backend clock one second at a time, feeds
//! its notifications into the engine and ticks the sleep timer while armed.

use media_engine::{
    AudioBackend, EngineError, EngineEvent, MediaEvent, PlaybackEngine, PlaybackFault,
    PlaybackSpeed, SimulatedBackend, TransportState,
};

fn engine_with_book(duration: f64) -> PlaybackEngine<SimulatedBackend> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = PlaybackEngine::new(SimulatedBackend::new(duration));
    engine.load("https://archive.org/download/sample.mp3", 0.0);
    run_seconds(&mut engine, 0);
    engine
}

/// Runs the host loop for `secs` seconds, returning every upward event
fn run_seconds(engine: &mut PlaybackEngine<SimulatedBackend>, secs: u32) -> Vec<EngineEvent> {
    let mut reported: Vec<EngineEvent> = engine
        .backend_mut()
        .drain_events()
        .into_iter()
        .filter_map(|e| engine.handle_event(e))
        .collect();

    for _ in 0..secs {
        for event in engine.backend_mut().advance(1.0) {
            reported.extend(engine.handle_event(event));
        }
        reported.extend(engine.tick());
    }
    reported
}

#[test]
fn test_speed_applies_to_backend_rate() {
    let mut engine = engine_with_book(3600.0);

    engine.set_speed_value(1.25).expect("1.25 is a valid step");

    assert_eq!(engine.speed(), PlaybackSpeed::X125);
    assert_eq!(engine.backend().rate(), 1.25);
    assert_eq!(engine.state().speed.value(), 1.25);

    run_seconds(&mut engine, 4);
    assert_eq!(engine.state().current_time, 5.0);
}

#[test]
fn test_only_discrete_speeds_accepted() {
    let mut engine = engine_with_book(3600.0);
    for rate in [0.75, 1.0, 1.25, 1.5, 2.0] {
        assert!(engine.set_speed_value(rate).is_ok());
    }
    for rate in [0.5, 1.1, 1.75, 3.0] {
        assert!(engine.set_speed_value(rate).is_err());
    }
    assert_eq!(engine.speed(), PlaybackSpeed::X200);
}

#[test]
fn test_speed_change_rejected_while_faulted() {
    let mut engine = engine_with_book(3600.0);
    engine.handle_event(MediaEvent::Error(3));

    assert!(matches!(
        engine.set_speed_value(2.0),
        Err(EngineError::ControlDisabled("speed"))
    ));
    assert_eq!(engine.speed(), PlaybackSpeed::X100);
    assert_eq!(engine.backend().rate(), 1.0);
}

#[test]
fn test_sleep_timer_expires_after_900_playing_seconds() {
    let mut engine = engine_with_book(7200.0);
    engine.set_sleep_timer(Some(15)).expect("timer accepted while playing");
    assert!(engine.sleep_ticker_armed());

    let events = run_seconds(&mut engine, 899);
    assert!(!events.contains(&EngineEvent::SleepTimerExpired));
    assert!(engine.state().is_playing);
    assert_eq!(engine.state().sleep_timer_display_minutes(), Some(1));

    let events = run_seconds(&mut engine, 1);
    assert!(events.contains(&EngineEvent::SleepTimerExpired));

    let state = engine.state();
    assert!(!state.is_playing);
    assert!(state.sleep_timer.is_none());
    assert!(!engine.sleep_ticker_armed());
    assert!(!engine.backend().is_playing());
}

#[test]
fn test_sleep_timer_does_not_advance_while_paused() {
    let mut engine = engine_with_book(7200.0);
    engine.set_sleep_timer(Some(15)).expect("timer accepted while playing");
    run_seconds(&mut engine, 60);

    engine.toggle_play();
    assert!(!engine.sleep_ticker_armed());
    let before = engine.state().sleep_timer;
    for _ in 0..120 {
        assert!(engine.tick().is_none());
    }
    assert_eq!(engine.state().sleep_timer, before);
    assert_eq!(before, Some(14.0));

    engine.toggle_play();
    run_seconds(&mut engine, 840);
    assert!(!engine.state().is_playing);
}

#[test]
fn test_mute_then_volume_keeps_silence_until_unmute() {
    let mut engine = engine_with_book(600.0);

    engine.set_muted(true);
    engine.set_volume(0.5);

    assert_eq!(engine.effective_volume(), 0.0);
    assert_eq!(engine.backend().volume(), 0.0);
    assert!(engine.state().muted);
    assert_eq!(engine.state().volume, 0.5);

    engine.toggle_mute();
    assert_eq!(engine.effective_volume(), 0.5);
    assert_eq!(engine.backend().volume(), 0.5);
}

#[test]
fn test_autoplay_blocked_is_not_an_error() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut backend = SimulatedBackend::new(600.0);
    backend.reject_next_play();
    let mut engine = PlaybackEngine::new(backend);

    engine.load("https://archive.org/download/sample.mp3", 120.0);

    assert_eq!(engine.transport(), TransportState::Paused);
    assert!(engine.fault().is_none());
    assert_eq!(engine.state().current_time, 120.0);
    assert!(run_seconds(&mut engine, 5)
        .iter()
        .all(|e| !matches!(e, EngineEvent::Progress(t) if *t > 120.0)));
}

#[test]
fn test_load_failure_surfaces_fault() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut backend = SimulatedBackend::new(600.0);
    backend.fail_next_load(4);
    let mut engine = PlaybackEngine::new(backend);

    engine.load("https://host/book.wma", 0.0);
    let events = run_seconds(&mut engine, 0);

    assert_eq!(
        events,
        vec![EngineEvent::Faulted(PlaybackFault::UnsupportedFormat)]
    );
    assert!(!engine.state().is_playing);
    assert!(!engine.controls().seek);
    assert!(!engine.controls().speed);
    assert_eq!(
        engine.fault().map(|f| f.message()),
        Some("Format not supported by this player (e.g. WMA).".to_string())
    );
}

#[test]
fn test_playing_to_the_end() {
    let mut engine = engine_with_book(10.0);
    let events = run_seconds(&mut engine, 12);

    assert!(events.contains(&EngineEvent::Finished));
    assert_eq!(engine.transport(), TransportState::Ended);
    assert_eq!(engine.state().current_time, 10.0);
    assert_eq!(engine.backend().duration(), 10.0);
}
