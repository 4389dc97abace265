// FILE: crates/library/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a key-value store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on key '{key}' at {path}: {source}")]
    Io {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Book not found: {0}")]
    BookNotFound(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

impl From<LibraryError> for auralis_core::AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::BookNotFound(id) => auralis_core::AppError::BookNotFound { id },
            other => auralis_core::AppError::persistence("library storage failed", other),
        }
    }
}
