//! Storage configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the library records live
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the file-backed store; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl ConfigSection for StorageConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        match &self.data_dir {
            Some(dir) if dir.as_os_str().is_empty() => Err(vec![ValidationError::new(
                "storage.data_dir",
                "must not be empty when set",
            )]),
            _ => Ok(()),
        }
    }

    fn merge(&mut self, other: Self) {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
    }

    fn section_name(&self) -> &'static str {
        "storage"
    }
}
