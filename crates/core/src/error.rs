//! Error taxonomy for Auralis
//!
//! Nothing in the player is fatal to the process. Every failure either
//! degrades to a message the user sees or to a silent fallback:
//! - **Silent**: persistence failures and operations that need a selected
//!   book when none is selected
//! - **Visible**: playback faults and insight failures, shown inline

use std::fmt;
use thiserror::Error;

/// How an error reaches the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Logged and swallowed, the user never sees it
    Silent,
    /// Shown as an inline message, the app keeps running
    Visible,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "Silent"),
            Self::Visible => write!(f, "Visible"),
        }
    }
}

/// Top-level error type shared by the front ends
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading or writing the persistent store failed
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The player reported a fault for the current track
    #[error("Playback fault: {message}")]
    Playback { message: String },

    /// The synopsis request failed
    #[error("Insight request failed: {message}")]
    Insight { message: String },

    /// An operation needing a selected book ran without one
    #[error("No book selected for {operation}")]
    NoActiveBook { operation: String },

    /// Lookup by id found nothing
    #[error("Book not found: {id}")]
    BookNotFound { id: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl AppError {
    /// Returns how this error is surfaced
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Persistence { .. } | Self::NoActiveBook { .. } => ErrorSeverity::Silent,
            _ => ErrorSeverity::Visible,
        }
    }

    /// Returns a user-facing message
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence { .. } => "Your library could not be saved.".to_string(),
            Self::Playback { message } | Self::Insight { message } => message.clone(),
            Self::NoActiveBook { .. } => "Select a book to start listening.".to_string(),
            Self::BookNotFound { .. } => "That book is not in your library.".to_string(),
            Self::InvalidArgument { argument, reason } => format!("{}: {}", argument, reason),
        }
    }

    /// Helper to create a persistence error from any error type
    pub fn persistence<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper for a missing-selection error
    pub fn no_active_book(operation: impl Into<String>) -> Self {
        Self::NoActiveBook {
            operation: operation.into(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_persistence_is_silent() {
        let err = AppError::persistence(
            "write failed",
            std::io::Error::new(std::io::ErrorKind::Other, "disk"),
        );
        assert_eq!(err.severity(), ErrorSeverity::Silent);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_playback_is_visible() {
        let err = AppError::Playback {
            message: "Network error while loading the audio.".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Visible);
        assert_eq!(err.user_message(), "Network error while loading the audio.");
    }

    #[test]
    fn test_no_active_book_is_silent() {
        let err = AppError::no_active_book("insight");
        assert_eq!(err.severity(), ErrorSeverity::Silent);
        assert!(err.to_string().contains("insight"));
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = AppError::InvalidArgument {
            argument: "speed".to_string(),
            reason: "must be one of 0.75, 1.0, 1.25, 1.5, 2.0".to_string(),
        };
        assert!(err.user_message().starts_with("speed:"));
    }
}
