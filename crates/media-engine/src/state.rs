//! Engine state management

use std::fmt;

/// Transport lifecycle of the single active track
///
/// A playback fault is tracked separately and can overlay any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// No book selected
    #[default]
    Empty,
    /// Source attached, playback not started yet
    Loading,
    Playing,
    Paused,
    /// Played to the end; behaves like `Paused`
    Ended,
}

impl TransportState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn has_source(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Ended => "ended",
        };
        write!(f, "{}", name)
    }
}

/// Which player controls are currently usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Seek bar
    pub seek: bool,
    pub speed: bool,
    pub sleep_timer: bool,
    /// Play/pause and skip buttons; replaced by the error display when false
    pub transport: bool,
}

impl Controls {
    pub fn all_disabled() -> Self {
        Self {
            seek: false,
            speed: false,
            sleep_timer: false,
            transport: false,
        }
    }

    pub fn all_enabled() -> Self {
        Self {
            seek: true,
            speed: true,
            sleep_timer: true,
            transport: true,
        }
    }
}
