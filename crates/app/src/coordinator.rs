//! Application coordinator
//!
//! Owns the library and the active selection, drives the playback engine
//! and applies what the engine reports. Nothing here is fatal: persistence
//! problems are swallowed by the library, playback faults live in the
//! engine and insight failures end up as a message in the view.

use crate::insight_view::{InsightTicket, InsightView};
use crate::settings::CoordinatorSettings;
use auralis_core::{AiInsight, AppError, Book, BookId, PlaybackSpeed, PlayerState, Result};
use auralis_insight::{InsightResult, InsightService};
use auralis_library::{KeyValueStore, LibraryStore, SessionHandles};
use log::{debug, error, info, warn};
use media_engine::{AudioBackend, Controls, EngineError, EngineEvent, MediaEvent, PlaybackEngine};
use std::path::PathBuf;

/// Fallback used by the delete prompt when the title is unknown
const UNKNOWN_BOOK_TITLE: &str = "this book";

pub struct AppCoordinator<S: KeyValueStore, B: AudioBackend> {
    library: LibraryStore<S>,
    engine: PlaybackEngine<B>,
    settings: CoordinatorSettings,
    handles: SessionHandles,
    active: Option<BookId>,
    pending_delete: Option<BookId>,
    insight: InsightView,
    insight_seq: u64,
}

impl<S: KeyValueStore, B: AudioBackend> AppCoordinator<S, B> {
    /// Wires the parts together and restores the last played selection
    pub fn start(library: LibraryStore<S>, engine: PlaybackEngine<B>, settings: CoordinatorSettings) -> Self {
        let mut coordinator = Self {
            library,
            engine,
            settings,
            handles: SessionHandles::new(),
            active: None,
            pending_delete: None,
            insight: InsightView::default(),
            insight_seq: 0,
        };
        coordinator.restore_selection();
        coordinator
    }

    fn restore_selection(&mut self) {
        let Some(id) = self.library.load_last_played() else {
            return;
        };
        if self.library.contains(&id) {
            info!("Restoring last played book {}", id);
            self.activate(id);
        } else {
            debug!("Last played book {} is no longer in the library", id);
        }
    }

    // Library and selection

    pub fn library(&self) -> &LibraryStore<S> {
        &self.library
    }

    pub fn books(&self) -> &[Book] {
        self.library.books()
    }

    pub fn active_id(&self) -> Option<&BookId> {
        self.active.as_ref()
    }

    pub fn active_book(&self) -> Option<&Book> {
        self.active.as_ref().and_then(|id| self.library.get(id))
    }

    /// Makes `id` the active book and records it as last played
    pub fn select_book(&mut self, id: &BookId) -> Result<()> {
        if !self.library.contains(id) {
            return Err(AppError::BookNotFound { id: id.to_string() });
        }
        self.library.save_last_played(id);

        if self.active.as_ref() == Some(id) {
            debug!("Book {} is already active", id);
            return Ok(());
        }
        self.activate(id.clone());
        Ok(())
    }

    fn activate(&mut self, id: BookId) {
        let Some(book) = self.library.get(&id) else {
            return;
        };
        let url = book.file_url.clone();
        let start = book.current_time;
        self.active = Some(id);
        let event = self.engine.load(&url, start);
        self.apply(event);
    }

    /// Imports local files as session books, returns their ids
    pub fn add_files(&mut self, paths: &[PathBuf]) -> Vec<BookId> {
        let files: Vec<_> = paths
            .iter()
            .map(|path| self.handles.register(path.clone()))
            .collect();
        let ids = self.library.add(&files);
        info!("Added {} local books", ids.len());
        ids
    }

    pub fn session_handles(&self) -> &SessionHandles {
        &self.handles
    }

    // Delete flow

    /// Starts the delete flow and returns the confirmation prompt
    pub fn request_delete(&mut self, id: &BookId) -> String {
        self.pending_delete = Some(id.clone());
        self.delete_prompt().unwrap_or_default()
    }

    pub fn pending_delete(&self) -> Option<&BookId> {
        self.pending_delete.as_ref()
    }

    /// Prompt for the pending deletion, if any
    pub fn delete_prompt(&self) -> Option<String> {
        let id = self.pending_delete.as_ref()?;
        let title = self
            .library
            .get(id)
            .map(|b| b.title.as_str())
            .unwrap_or(UNKNOWN_BOOK_TITLE);
        Some(format!(
            "Are you sure you want to remove \"{}\" from your library? This cannot be undone.",
            title
        ))
    }

    /// Removes the pending book; clears the selection if it was active
    ///
    /// `Ok(None)` when no deletion is pending.
    pub fn confirm_delete(&mut self) -> Result<Option<Book>> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        let removed = self.library.remove(&id)?;

        if self.active.as_ref() == Some(&id) {
            self.active = None;
            self.engine.unload();
        }
        if removed.is_local && self.handles.revoke(&removed.file_url) {
            debug!("Revoked handle {}", removed.file_url);
        }
        Ok(Some(removed))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // Playback

    pub fn engine(&self) -> &PlaybackEngine<B> {
        &self.engine
    }

    /// Host access to the engine, e.g. to pump backend notifications
    pub fn engine_mut(&mut self) -> &mut PlaybackEngine<B> {
        &mut self.engine
    }

    pub fn player_state(&self) -> PlayerState {
        self.engine.state()
    }

    pub fn controls(&self) -> Controls {
        self.engine.controls()
    }

    /// Inline message for the current playback fault
    pub fn fault_message(&self) -> Option<String> {
        self.engine.fault().map(|f| f.message())
    }

    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    pub fn toggle_play(&mut self) {
        self.engine.toggle_play();
    }

    pub fn skip_back(&mut self) {
        self.engine.skip(-self.settings.skip_back_secs);
    }

    pub fn skip_forward(&mut self) {
        self.engine.skip(self.settings.skip_forward_secs);
    }

    pub fn skip(&mut self, delta_secs: f64) {
        self.engine.skip(delta_secs);
    }

    pub fn seek(&mut self, time: f64) {
        self.engine.seek(time);
    }

    /// Applies a numeric speed; only the discrete steps are accepted
    pub fn set_speed(&mut self, rate: f32) -> Result<()> {
        self.engine.set_speed_value(rate).map_err(|e| match e {
            EngineError::InvalidSpeed(_) => AppError::InvalidArgument {
                argument: "speed".to_string(),
                reason: format!("{} is not one of {:?}", rate, PlaybackSpeed::ALL.map(|s| s.value())),
            },
            other => self.control_error("speed", other),
        })
    }

    pub fn set_volume(&mut self, level: f32) {
        self.engine.set_volume(level);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.engine.set_muted(muted);
    }

    pub fn toggle_mute(&mut self) {
        self.engine.toggle_mute();
    }

    /// Starts one of the configured presets, or turns the timer off with `None`
    pub fn set_sleep_timer(&mut self, minutes: Option<u32>) -> Result<()> {
        if let Some(m) = minutes {
            if !self.settings.sleep_timer_presets.contains(&m) {
                return Err(AppError::InvalidArgument {
                    argument: "sleep timer".to_string(),
                    reason: format!("{} is not one of {:?} minutes", m, self.settings.sleep_timer_presets),
                });
            }
        }
        self.engine
            .set_sleep_timer(minutes)
            .map_err(|e| self.control_error("sleep timer", e))
    }

    /// Explains why a disabled control refused a change
    fn control_error(&self, operation: &str, err: EngineError) -> AppError {
        debug!("{} refused: {}", operation, err);
        match self.fault_message() {
            Some(message) => AppError::Playback { message },
            None => AppError::no_active_book(operation),
        }
    }

    pub fn sleep_ticker_armed(&self) -> bool {
        self.engine.sleep_ticker_armed()
    }

    /// One second of the sleep ticker
    pub fn tick(&mut self) -> Option<EngineEvent> {
        let event = self.engine.tick();
        self.apply(event)
    }

    /// Feeds a backend notification through the engine
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Option<EngineEvent> {
        let event = self.engine.handle_event(event);
        self.apply(event)
    }

    /// Reports a playback offset; reaches the library only past the threshold
    ///
    /// Returns true when the library was updated.
    pub fn report_progress(&mut self, time: f64) -> bool {
        let Some(book) = self.active_book() else {
            return false;
        };
        if (time - book.current_time).abs() <= self.settings.progress_threshold_secs {
            return false;
        }

        let id = book.id.clone();
        match self.library.update_progress(&id, time) {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropping progress for {}: {}", id, e);
                false
            }
        }
    }

    fn apply(&mut self, event: Option<EngineEvent>) -> Option<EngineEvent> {
        match event? {
            EngineEvent::Progress(time) => {
                self.report_progress(time);
            }
            EngineEvent::DurationKnown(duration) => {
                if let Some(id) = self.active.clone() {
                    if let Err(e) = self.library.set_duration(&id, duration) {
                        warn!("Dropping duration for {}: {}", id, e);
                    }
                }
            }
            EngineEvent::Finished => {
                info!(
                    "Finished {}",
                    self.active_book().map(|b| b.title.as_str()).unwrap_or("book")
                );
            }
            EngineEvent::Faulted(fault) => {
                debug!("Active book faulted: {}", fault);
            }
            EngineEvent::SleepTimerExpired => {
                info!("Sleep timer paused playback");
            }
        }
        event
    }

    // Insight flow

    pub fn insight_view(&self) -> &InsightView {
        &self.insight
    }

    /// Opens the view for the active book; `None` without one
    pub fn begin_insight(&mut self) -> Option<InsightTicket> {
        let book = self.active_book()?;
        let title = book.title.clone();
        let author = book.author.clone();

        self.insight_seq += 1;
        self.insight.start();
        Some(InsightTicket {
            seq: self.insight_seq,
            title,
            author,
        })
    }

    /// Stores the outcome of a request; outcomes of superseded requests are dropped
    ///
    /// Returns true when the outcome was applied.
    pub fn complete_insight(&mut self, seq: u64, outcome: InsightResult<AiInsight>) -> bool {
        if seq != self.insight_seq {
            debug!("Discarding insight #{} superseded by #{}", seq, self.insight_seq);
            return false;
        }

        self.insight.loading = false;
        match outcome {
            Ok(insight) => {
                self.insight.result = Some(insight);
                self.insight.error = None;
            }
            Err(e) => {
                error!("Insight request failed: {}", e);
                self.insight.result = None;
                self.insight.error = Some(e.user_message());
            }
        }
        true
    }

    /// Runs a full insight request for the active book
    pub async fn request_insight(&mut self, service: &dyn InsightService) {
        let Some(ticket) = self.begin_insight() else {
            debug!("Insight requested without an active book");
            return;
        };
        let outcome = service.generate(&ticket.title, &ticket.author).await;
        self.complete_insight(ticket.seq, outcome);
    }

    pub fn close_insight(&mut self) {
        self.insight.close();
    }
}
