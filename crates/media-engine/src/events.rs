//! Notifications in and out of the engine

use crate::error::{MediaErrorCode, PlaybackFault};

/// Notification emitted by the playback capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback offset moved
    TimeUpdate,
    /// Duration became known
    LoadedMetadata,
    Error(MediaErrorCode),
    /// Reached the end of the track
    Ended,
}

/// What the engine reports upward after handling a notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Current offset in seconds, feeds the progress throttle
    Progress(f64),
    DurationKnown(f64),
    /// The track played to the end
    Finished,
    Faulted(PlaybackFault),
    /// The sleep timer ran out and paused playback
    SleepTimerExpired,
}
