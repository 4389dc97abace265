//! Shared domain model for the Auralis audiobook player

pub mod error;
pub mod types;

pub use error::{AppError, ErrorSeverity, Result};
pub use types::{
    format_clock, format_short, AiInsight, Book, BookId, PlaybackSpeed, PlayerState, Timestamp,
    EPHEMERAL_SCHEME, MAX_INSIGHT_ITEMS,
};
