//! Domain types for Auralis
//!
//! - `book`: library entries and their identifiers
//! - `playback`: playback speed steps and the player snapshot
//! - `insight`: generated synopsis
//! - `common`: timestamps and time formatting

mod book;
mod common;
mod insight;
mod playback;

pub use book::{Book, BookId, EPHEMERAL_SCHEME};
pub use common::{format_clock, format_short, Timestamp};
pub use insight::{AiInsight, MAX_INSIGHT_ITEMS};
pub use playback::{PlaybackSpeed, PlayerState};
