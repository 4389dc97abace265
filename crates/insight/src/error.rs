// crates/insight/src/error.rs
//! Error types for synopsis requests

use thiserror::Error;

/// Result type for insight operations
pub type InsightResult<T> = Result<T, InsightError>;

/// Errors that can occur while requesting a synopsis
#[derive(Debug, Error)]
pub enum InsightError {
    /// No API credential configured
    #[error("API key not found (set {env_var})")]
    MissingCredential { env_var: String },

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered without any text
    #[error("The service returned no content")]
    EmptyResponse,

    /// The answer did not match the synopsis schema
    #[error("Malformed synopsis: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InsightError {
    /// Message shown in the insight view
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential { env_var } => {
                format!("API key not found. Set the {} environment variable.", env_var)
            }
            Self::EmptyResponse => "The AI returned no answer.".to_string(),
            _ => "Could not generate insights for this book.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_variable() {
        let err = InsightError::MissingCredential {
            env_var: "API_KEY".to_string(),
        };
        assert!(err.user_message().contains("API_KEY"));
    }

    #[test]
    fn test_api_error_message_is_generic() {
        let bad_request = InsightError::Api {
            status: 400,
            message: "bad".to_string(),
        };
        assert_eq!(
            bad_request.user_message(),
            "Could not generate insights for this book."
        );
    }
}
