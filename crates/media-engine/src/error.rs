// FILE: crates/media-engine/src/error.rs

use thiserror::Error;

/// Native media error code reported by the playback capability
pub type MediaErrorCode = u16;

/// Fault reported for the current track, shown inline to the user
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackFault {
    #[error("Playback aborted.")]
    Aborted,

    #[error("Network error while loading the audio.")]
    Network,

    #[error("The audio is corrupted or in an unknown format.")]
    Decode,

    #[error("Format not supported by this player (e.g. WMA).")]
    UnsupportedFormat,
}

impl PlaybackFault {
    /// Maps a native media error code, unknown codes count as decode faults
    pub fn from_media_code(code: MediaErrorCode) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::UnsupportedFormat,
            _ => Self::Decode,
        }
    }

    /// Fixed user-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// The environment refused to start playback without a user gesture
    #[error("Playback blocked: {0}")]
    PlaybackBlocked(String),

    #[error("No source attached")]
    NoSource,

    #[error("Invalid speed: {0}")]
    InvalidSpeed(f32),

    /// The control is unavailable in the current transport state
    #[error("The {0} control is disabled")]
    ControlDisabled(&'static str),

    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error(transparent)]
    Fault(#[from] PlaybackFault),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_codes_map_in_order() {
        assert_eq!(PlaybackFault::from_media_code(1), PlaybackFault::Aborted);
        assert_eq!(PlaybackFault::from_media_code(2), PlaybackFault::Network);
        assert_eq!(PlaybackFault::from_media_code(3), PlaybackFault::Decode);
        assert_eq!(
            PlaybackFault::from_media_code(4),
            PlaybackFault::UnsupportedFormat
        );
    }

    #[test]
    fn test_unknown_code_is_decode() {
        assert_eq!(PlaybackFault::from_media_code(0), PlaybackFault::Decode);
        assert_eq!(PlaybackFault::from_media_code(99), PlaybackFault::Decode);
    }

    #[test]
    fn test_fault_messages() {
        assert_eq!(PlaybackFault::Aborted.message(), "Playback aborted.");
        assert_eq!(
            PlaybackFault::UnsupportedFormat.message(),
            "Format not supported by this player (e.g. WMA)."
        );
        let err: EngineError = PlaybackFault::Network.into();
        assert_eq!(err.to_string(), "Network error while loading the audio.");
        assert_eq!(
            EngineError::ControlDisabled("speed").to_string(),
            "The speed control is disabled"
        );
    }
}
