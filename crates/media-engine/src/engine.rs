//! Playback engine - transport state over a single active track

use crate::backend::AudioBackend;
use crate::error::{EngineError, EngineResult, PlaybackFault};
use crate::events::{EngineEvent, MediaEvent};
use crate::sleep_timer::SleepTimer;
use crate::state::{Controls, TransportState};
use crate::volume::VolumeControl;
use auralis_core::{PlaybackSpeed, PlayerState};
use log::{debug, info, warn};

/// Owns the transport state of one track and drives the backend
///
/// The engine never touches the library. It reports offsets, durations,
/// faults and completion upward as [`EngineEvent`]s.
pub struct PlaybackEngine<B: AudioBackend> {
    backend: B,
    transport: TransportState,
    fault: Option<PlaybackFault>,
    source: Option<String>,
    current_time: f64,
    duration: f64,
    speed: PlaybackSpeed,
    volume: VolumeControl,
    sleep_timer: SleepTimer,
}

impl<B: AudioBackend> PlaybackEngine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, PlaybackSpeed::default(), 1.0)
    }

    /// Creates an engine with an initial speed and volume level
    pub fn with_settings(mut backend: B, speed: PlaybackSpeed, volume: f32) -> Self {
        let volume = VolumeControl::new(volume);
        backend.set_playback_rate(speed.value());
        backend.set_volume(volume.effective());

        Self {
            backend,
            transport: TransportState::Empty,
            fault: None,
            source: None,
            current_time: 0.0,
            duration: 0.0,
            speed,
            volume,
            sleep_timer: SleepTimer::new(),
        }
    }

    /// Attaches a new track, resumes at `start_time` and tries to autoplay
    ///
    /// A blocked autoplay leaves the engine paused. A source the backend
    /// cannot attach puts the engine in the faulted state.
    pub fn load(&mut self, url: &str, start_time: f64) -> Option<EngineEvent> {
        info!("Loading {}", url);
        self.fault = None;
        self.source = Some(url.to_string());
        self.transport = TransportState::Loading;
        self.current_time = 0.0;
        self.duration = 0.0;

        if let Err(e) = self.backend.attach_source(url) {
            let fault = match e {
                EngineError::Fault(fault) => fault,
                other => {
                    warn!("Backend rejected source {}: {}", url, other);
                    PlaybackFault::Decode
                }
            };
            return Some(self.enter_fault(fault));
        }

        self.backend.set_playback_rate(self.speed.value());
        self.backend.set_volume(self.volume.effective());
        self.duration = self.backend.duration();
        if start_time > 0.0 {
            self.backend.set_current_time(start_time);
        }
        self.current_time = self.backend.current_time();

        self.start_playback();
        None
    }

    /// Releases the track and returns to `Empty`
    pub fn unload(&mut self) {
        if self.source.take().is_some() {
            debug!("Unloading current track");
        }
        self.backend.detach();
        self.transport = TransportState::Empty;
        self.fault = None;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.sleep_timer.clear();
    }

    /// Flips between playing and paused
    pub fn toggle_play(&mut self) {
        if self.transport.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn play(&mut self) {
        if !self.controls().transport {
            debug!("Ignoring play in state {}", self.transport);
            return;
        }
        if !self.transport.is_playing() {
            self.start_playback();
        }
    }

    pub fn pause(&mut self) {
        if self.transport.is_playing() {
            self.backend.pause();
            self.transport = TransportState::Paused;
        }
    }

    /// Moves the playhead by a signed offset
    pub fn skip(&mut self, delta_secs: f64) {
        if !self.controls().transport {
            debug!("Ignoring skip in state {}", self.transport);
            return;
        }
        let target = self.backend.current_time() + delta_secs;
        self.move_playhead(target);
    }

    /// Jumps to an absolute offset
    pub fn seek(&mut self, time: f64) {
        if !self.controls().seek {
            debug!("Ignoring seek in state {}", self.transport);
            return;
        }
        self.move_playhead(time);
    }

    /// Applies a speed step; fails while the speed control is disabled
    pub fn set_speed(&mut self, speed: PlaybackSpeed) -> EngineResult<()> {
        if !self.controls().speed {
            debug!("Rejecting speed change in state {}", self.transport);
            return Err(EngineError::ControlDisabled("speed"));
        }
        self.speed = speed;
        self.backend.set_playback_rate(speed.value());
        Ok(())
    }

    /// Sets the speed from a numeric rate, rejecting rates outside the steps
    pub fn set_speed_value(&mut self, rate: f32) -> EngineResult<()> {
        let speed = PlaybackSpeed::from_value(rate).map_err(|_| EngineError::InvalidSpeed(rate))?;
        self.set_speed(speed)
    }

    /// Sets the stored level; the mute flag is left alone
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.backend.set_volume(self.volume.effective());
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.volume.set_muted(muted);
        self.backend.set_volume(self.volume.effective());
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.volume.is_muted());
    }

    /// Starts, replaces or (with `None`) cancels the sleep countdown
    pub fn set_sleep_timer(&mut self, minutes: Option<u32>) -> EngineResult<()> {
        if !self.controls().sleep_timer {
            debug!("Rejecting sleep timer in state {}", self.transport);
            return Err(EngineError::ControlDisabled("sleep timer"));
        }
        self.sleep_timer.set(minutes);
        match self.sleep_timer.remaining_secs() {
            Some(secs) => info!("Sleep timer set for {} s", secs),
            None => info!("Sleep timer off"),
        }
        Ok(())
    }

    /// True while the host should run its one-second ticker
    pub fn sleep_ticker_armed(&self) -> bool {
        self.sleep_timer.is_set() && self.transport.is_playing() && self.fault.is_none()
    }

    /// One second of the sleep ticker
    pub fn tick(&mut self) -> Option<EngineEvent> {
        if !self.sleep_ticker_armed() {
            return None;
        }
        if self.sleep_timer.tick() {
            info!("Sleep timer expired, pausing");
            self.pause();
            return Some(EngineEvent::SleepTimerExpired);
        }
        None
    }

    /// Handles a notification from the backend
    pub fn handle_event(&mut self, event: MediaEvent) -> Option<EngineEvent> {
        if !self.transport.has_source() {
            debug!("Dropping {:?} without a source", event);
            return None;
        }

        match event {
            MediaEvent::TimeUpdate => {
                self.current_time = self.backend.current_time();
                Some(EngineEvent::Progress(self.current_time))
            }
            MediaEvent::LoadedMetadata => {
                self.duration = self.backend.duration();
                self.current_time = self.backend.current_time();
                self.fault = None;
                Some(EngineEvent::DurationKnown(self.duration))
            }
            MediaEvent::Error(code) => {
                Some(self.enter_fault(PlaybackFault::from_media_code(code)))
            }
            MediaEvent::Ended => {
                self.current_time = self.backend.current_time();
                self.transport = TransportState::Ended;
                info!("Reached the end of {}", self.source.as_deref().unwrap_or("track"));
                Some(EngineEvent::Finished)
            }
        }
    }

    /// Snapshot for display and persistence
    pub fn state(&self) -> PlayerState {
        PlayerState {
            is_playing: self.transport.is_playing(),
            current_time: self.current_time,
            duration: self.duration,
            speed: self.speed,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            sleep_timer: self.sleep_timer.remaining_minutes(),
        }
    }

    /// Controls usable in the current state
    pub fn controls(&self) -> Controls {
        if self.fault.is_some() || !self.transport.has_source() {
            Controls::all_disabled()
        } else {
            Controls::all_enabled()
        }
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn fault(&self) -> Option<PlaybackFault> {
        self.fault
    }

    pub fn is_errored(&self) -> bool {
        self.fault.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn effective_volume(&self) -> f32 {
        self.volume.effective()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn start_playback(&mut self) {
        match self.backend.play() {
            Ok(()) => self.transport = TransportState::Playing,
            Err(EngineError::PlaybackBlocked(reason)) => {
                warn!("Autoplay blocked: {}", reason);
                self.transport = TransportState::Paused;
            }
            Err(e) => {
                warn!("Could not start playback: {}", e);
                self.transport = TransportState::Paused;
            }
        }
    }

    fn move_playhead(&mut self, target: f64) {
        self.backend.set_current_time(target);
        self.current_time = self.backend.current_time();
    }

    fn enter_fault(&mut self, fault: PlaybackFault) -> EngineEvent {
        warn!("Playback fault ({:?}): {}", fault, fault);
        self.fault = Some(fault);
        self.backend.pause();
        if self.transport.is_playing() {
            self.transport = TransportState::Paused;
        }
        EngineEvent::Faulted(fault)
    }
}
