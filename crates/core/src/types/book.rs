//! Book domain model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// URL scheme of session-scoped handles. They die with the process.
pub const EPHEMERAL_SCHEME: &str = "blob:";

/// Unique identifier for a book
///
/// Opaque string: seed entries use fixed ids such as `sample-1`, imported
/// books get a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Creates a new random BookId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A library entry
///
/// `duration == 0.0` means the length is not known yet. Once it is known,
/// `0 <= current_time <= duration` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_url: String,
    /// Ephemeral `blob:` handle or durable remote address
    pub file_url: String,
    /// Total length in seconds
    pub duration: f64,
    /// Resume point in seconds
    pub current_time: f64,
    pub last_played: Timestamp,
    pub is_local: bool,
}

impl Book {
    /// Creates a book for a locally selected file
    pub fn new_local(title: String, author: String, handle: String) -> Self {
        Self {
            id: BookId::new(),
            title,
            author,
            cover_url: String::new(),
            file_url: handle,
            duration: 0.0,
            current_time: 0.0,
            last_played: Timestamp::now(),
            is_local: true,
        }
    }

    /// True if the book points at a session-scoped handle that will not
    /// survive a restart
    pub fn has_ephemeral_handle(&self) -> bool {
        self.is_local && self.file_url.starts_with(EPHEMERAL_SCHEME)
    }

    /// Returns true once real metadata has been reported
    pub fn has_known_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Clamps an offset into the playable range of this book
    pub fn clamp_time(&self, time: f64) -> f64 {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        if self.has_known_duration() {
            time.min(self.duration)
        } else {
            time
        }
    }

    /// Stores a new resume point and refreshes the recency stamp
    pub fn record_progress(&mut self, time: f64, at: Timestamp) {
        self.current_time = self.clamp_time(time);
        self.last_played = at;
    }

    /// Records the duration reported by the player
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.current_time = self.clamp_time(self.current_time);
    }

    /// Listened share in percent, 0 while the duration is unknown
    pub fn progress_percent(&self) -> f64 {
        if !self.has_known_duration() {
            return 0.0;
        }
        (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
    }

    /// Seconds left to listen, never negative
    pub fn remaining_seconds(&self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }

    /// Share still to listen, in percent, 0 while the duration is unknown
    pub fn remaining_percent(&self) -> f64 {
        if !self.has_known_duration() {
            return 0.0;
        }
        100.0 - self.progress_percent()
    }
}
