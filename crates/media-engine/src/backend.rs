//! Playback capability abstraction
//!
//! The engine drives any backend through [`AudioBackend`]: attach a source,
//! move the playhead, set rate and volume, start and stop. The backend
//! reports back through [`MediaEvent`]s that the host feeds into
//! [`crate::PlaybackEngine::handle_event`].

use crate::error::{EngineError, EngineResult, MediaErrorCode};
use crate::events::MediaEvent;
use std::collections::{HashMap, VecDeque};

/// Native audio playback capability
pub trait AudioBackend {
    /// Replaces the current source; playback is stopped at offset 0
    fn attach_source(&mut self, url: &str) -> EngineResult<()>;

    /// Current offset in seconds
    fn current_time(&self) -> f64;

    /// Moves the playhead; the backend clamps into `[0, duration]`
    fn set_current_time(&mut self, secs: f64);

    /// Total length in seconds, 0 while unknown
    fn duration(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f32);

    /// Output volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    /// Starts playback; `EngineError::PlaybackBlocked` when the environment
    /// refuses to play without a user gesture
    fn play(&mut self) -> EngineResult<()>;

    fn pause(&mut self);

    /// Releases the current source
    fn detach(&mut self);
}

/// In-process backend with a virtual clock
///
/// Time moves only through [`SimulatedBackend::advance`], at the current
/// playback rate. Notifications are queued and handed out by `advance` and
/// [`SimulatedBackend::drain_events`].
#[derive(Debug)]
pub struct SimulatedBackend {
    source: Option<String>,
    position: f64,
    duration: f64,
    rate: f32,
    volume: f32,
    playing: bool,
    default_duration: f64,
    durations: HashMap<String, f64>,
    reject_next_play: bool,
    fail_next_load: Option<MediaErrorCode>,
    events: VecDeque<MediaEvent>,
}

impl SimulatedBackend {
    /// Creates a backend where every source lasts `default_duration` seconds
    ///
    /// A default of 0 leaves the duration unknown.
    pub fn new(default_duration: f64) -> Self {
        Self {
            source: None,
            position: 0.0,
            duration: 0.0,
            rate: 1.0,
            volume: 1.0,
            playing: false,
            default_duration: default_duration.max(0.0),
            durations: HashMap::new(),
            reject_next_play: false,
            fail_next_load: None,
            events: VecDeque::new(),
        }
    }

    /// Overrides the length reported for one source
    pub fn set_source_duration(&mut self, url: impl Into<String>, secs: f64) {
        self.durations.insert(url.into(), secs.max(0.0));
    }

    /// Makes the next `play` call fail as blocked autoplay
    pub fn reject_next_play(&mut self) {
        self.reject_next_play = true;
    }

    /// Makes the next attached source fail with `code` instead of loading
    pub fn fail_next_load(&mut self, code: MediaErrorCode) {
        self.fail_next_load = Some(code);
    }

    /// Reports a media error for the current source right away
    pub fn inject_error(&mut self, code: MediaErrorCode) {
        self.playing = false;
        self.events.push_back(MediaEvent::Error(code));
    }

    /// Advances the virtual clock by `secs` of wall time
    ///
    /// Returns every notification produced since the last drain.
    pub fn advance(&mut self, secs: f64) -> Vec<MediaEvent> {
        if self.playing && secs > 0.0 {
            self.position += secs * f64::from(self.rate);
            if self.duration > 0.0 && self.position >= self.duration {
                self.position = self.duration;
                self.playing = false;
                self.events.push_back(MediaEvent::TimeUpdate);
                self.events.push_back(MediaEvent::Ended);
            } else {
                self.events.push_back(MediaEvent::TimeUpdate);
            }
        }
        self.drain_events()
    }

    pub fn drain_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AudioBackend for SimulatedBackend {
    fn attach_source(&mut self, url: &str) -> EngineResult<()> {
        if url.trim().is_empty() {
            return Err(EngineError::InvalidSource(url.to_string()));
        }

        self.source = Some(url.to_string());
        self.position = 0.0;
        self.playing = false;
        self.events.clear();

        if let Some(code) = self.fail_next_load.take() {
            self.duration = 0.0;
            self.events.push_back(MediaEvent::Error(code));
            return Ok(());
        }

        self.duration = self
            .durations
            .get(url)
            .copied()
            .unwrap_or(self.default_duration);
        if self.duration > 0.0 {
            self.events.push_back(MediaEvent::LoadedMetadata);
        }
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, secs: f64) {
        if self.source.is_none() || !secs.is_finite() {
            return;
        }
        let mut position = secs.max(0.0);
        if self.duration > 0.0 {
            position = position.min(self.duration);
        }
        self.position = position;
        self.events.push_back(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.rate = rate;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn play(&mut self) -> EngineResult<()> {
        if self.source.is_none() {
            return Err(EngineError::NoSource);
        }
        if self.reject_next_play {
            self.reject_next_play = false;
            return Err(EngineError::PlaybackBlocked(
                "play() without user interaction".to_string(),
            ));
        }
        if self.duration > 0.0 && self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn detach(&mut self) {
        self.source = None;
        self.position = 0.0;
        self.duration = 0.0;
        self.playing = false;
        self.events.clear();
    }
}
