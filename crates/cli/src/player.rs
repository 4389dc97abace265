use crate::commands::{select_or_active, Coordinator, Environment};
use anyhow::{Context, Result};
use auralis_core::{format_clock, BookId};
use clap::ArgMatches;
use console::{style, Term};
use media_engine::{EngineEvent, TransportState};
use std::path::PathBuf;
use std::time::Duration as StdDuration;
use tokio::time::interval;

/// Play a book on the simulated backend for a number of seconds
pub async fn play(env: &Environment, matches: &ArgMatches) -> Result<()> {
    let mut coordinator = env.open_coordinator()?;

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let added = coordinator.add_files(&files);

    let requested = match (matches.get_one::<String>("id"), added.first()) {
        (Some(id), _) => Some(id.clone()),
        (None, Some(first)) => Some(first.to_string()),
        (None, None) => None,
    };
    let book = select_or_active(&mut coordinator, requested.as_ref())?;

    apply_options(&mut coordinator, matches)?;

    let seconds = matches.get_one::<u64>("seconds").copied().unwrap_or(10);
    println!(
        "{} {} by {}",
        style("▶").green().bold(),
        style(&book.title).bold(),
        book.author
    );
    run_session(&mut coordinator, seconds).await?;
    print_resume_hint(&coordinator, &book.id);
    Ok(())
}

fn apply_options(coordinator: &mut Coordinator, matches: &ArgMatches) -> Result<()> {
    if let Some(rate) = matches.get_one::<f32>("speed") {
        coordinator.set_speed(*rate).context("Invalid --speed")?;
    }
    if let Some(percent) = matches.get_one::<u8>("volume") {
        coordinator.set_volume(f32::from(*percent) / 100.0);
    }
    if matches.get_flag("mute") {
        coordinator.set_muted(true);
    }
    if let Some(minutes) = matches.get_one::<u32>("sleep") {
        coordinator
            .set_sleep_timer(Some(*minutes))
            .context("Invalid --sleep")?;
    }
    Ok(())
}

async fn run_session(coordinator: &mut Coordinator, seconds: u64) -> Result<()> {
    let term = Term::stdout();
    if term.hide_cursor().is_err() {
        eprintln!("Warning: Failed to hide cursor");
    }

    let mut events = dispatch_pending(coordinator);
    let mut ticker = interval(StdDuration::from_secs(1));
    ticker.tick().await;

    let mut remaining = seconds;
    while !report_events(&events, coordinator) && remaining > 0 {
        term.clear_line().ok();
        term.write_str(&status_line(coordinator))
            .context("Failed to write status")?;

        ticker.tick().await;
        events = step(coordinator);
        remaining -= 1;
    }

    term.clear_line().ok();
    term.write_line(&status_line(coordinator))
        .context("Failed to write status")?;
    term.show_cursor().ok();
    Ok(())
}

/// Pushes queued backend notifications through the coordinator
pub(crate) fn dispatch_pending(coordinator: &mut Coordinator) -> Vec<EngineEvent> {
    let pending = coordinator.engine_mut().backend_mut().drain_events();
    pending
        .into_iter()
        .filter_map(|event| coordinator.handle_media_event(event))
        .collect()
}

/// One second of host time: advances the backend and ticks the sleep timer
pub(crate) fn step(coordinator: &mut Coordinator) -> Vec<EngineEvent> {
    let notifications = coordinator.engine_mut().backend_mut().advance(1.0);
    let mut events: Vec<EngineEvent> = notifications
        .into_iter()
        .filter_map(|event| coordinator.handle_media_event(event))
        .collect();

    if coordinator.sleep_ticker_armed() {
        events.extend(coordinator.tick());
    }
    events
}

/// Prints notable events; returns true when the session should stop
fn report_events(events: &[EngineEvent], coordinator: &Coordinator) -> bool {
    let mut stop = false;
    for event in events {
        match event {
            EngineEvent::Finished => {
                println!("\n{} Finished", style("■").cyan());
                stop = true;
            }
            EngineEvent::SleepTimerExpired => {
                println!("\n{} Sleep timer expired, playback paused", style("☾").cyan());
                stop = true;
            }
            EngineEvent::Faulted(_) => {
                let message = coordinator.fault_message().unwrap_or_default();
                println!("\n{} {}", style("✗").red().bold(), message);
                stop = true;
            }
            EngineEvent::Progress(_) | EngineEvent::DurationKnown(_) => {}
        }
    }
    stop
}

pub(crate) fn status_line(coordinator: &Coordinator) -> String {
    let state = coordinator.player_state();
    let transport = coordinator.engine().transport();
    let icon = match transport {
        TransportState::Playing => "▶",
        TransportState::Paused => "⏸",
        TransportState::Ended => "■",
        TransportState::Loading | TransportState::Empty => "…",
    };

    let mut line = format!(
        "{} {} / {}  {}x  vol {}%",
        icon,
        format_clock(state.current_time),
        format_clock(state.duration),
        state.speed.value(),
        (state.effective_volume() * 100.0).round()
    );
    if state.muted {
        line.push_str(" (muted)");
    }
    if let Some(minutes) = state.sleep_timer_display_minutes() {
        line.push_str(&format!("  sleep {}m", minutes));
    }
    line
}

fn print_resume_hint(coordinator: &Coordinator, id: &BookId) {
    match coordinator.library().get(id) {
        Some(book) if book.is_local => println!(
            "{} Local files are only available for this session.",
            style("ℹ").blue()
        ),
        Some(book) => println!(
            "Saved position {} for '{}'.",
            format_clock(book.current_time),
            book.title
        ),
        None => {}
    }
}
