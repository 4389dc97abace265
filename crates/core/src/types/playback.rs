//! Playback-related domain models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback rate, restricted to the steps offered by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    X075,
    #[default]
    X100,
    X125,
    X150,
    X200,
}

impl PlaybackSpeed {
    /// Every selectable speed, slowest first
    pub const ALL: [PlaybackSpeed; 5] = [
        PlaybackSpeed::X075,
        PlaybackSpeed::X100,
        PlaybackSpeed::X125,
        PlaybackSpeed::X150,
        PlaybackSpeed::X200,
    ];

    /// Looks up the step matching a numeric rate
    pub fn from_value(value: f32) -> Result<Self, String> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| (s.value() - value).abs() < 1e-3)
            .ok_or_else(|| {
                format!(
                    "Speed must be one of 0.75, 1.0, 1.25, 1.5, 2.0, got {}",
                    value
                )
            })
    }

    /// Returns the rate multiplier
    pub fn value(&self) -> f32 {
        match self {
            Self::X075 => 0.75,
            Self::X100 => 1.0,
            Self::X125 => 1.25,
            Self::X150 => 1.5,
            Self::X200 => 2.0,
        }
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}

/// Snapshot of the transport state owned by the playback engine
///
/// Not persisted; the library only mirrors `current_time` through the
/// throttled progress path.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub speed: PlaybackSpeed,
    /// Stored volume in `[0, 1]`, unaffected by mute
    pub volume: f32,
    pub muted: bool,
    /// Remaining sleep-timer minutes, `None` when off
    pub sleep_timer: Option<f64>,
}

impl PlayerState {
    /// Volume actually applied to the output
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Played share of the track in percent
    pub fn progress_percent(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
    }

    /// Remaining sleep-timer minutes rounded up for display
    pub fn sleep_timer_display_minutes(&self) -> Option<u32> {
        self.sleep_timer.map(|m| m.ceil().max(0.0) as u32)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            speed: PlaybackSpeed::default(),
            volume: 1.0,
            muted: false,
            sleep_timer: None,
        }
    }
}
