//! Auralis configuration
//!
//! `config.toml` holds three sections: `player`, `insight` and `storage`.
//! A missing file means defaults, writes are atomic, and every section
//! validates itself through `ConfigSection`.
//!
//! # Example
//!
//! ```rust,no_run
//! use auralis_config::ConfigManager;
//!
//! let manager = ConfigManager::new().expect("Failed to resolve config directory");
//! let config = manager.load_or_default();
//! println!("Skip forward: {}s", config.player.skip_forward_secs);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

mod insight_config;
mod player_config;
mod storage_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::ConfigManager;
pub use validation::{ConfigSection, Validator};

pub use insight_config::InsightConfig;
pub use player_config::{PlayerConfig, SUPPORTED_SPEEDS};
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Player preferences
    pub player: PlayerConfig,

    /// Synopsis service settings
    pub insight: InsightConfig,

    /// Library storage location
    pub storage: StorageConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section and returns all errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.player.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.insight.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.storage.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    pub fn merge(&mut self, other: Config) {
        self.player.merge(other.player);
        self.insight.merge(other.insight);
        self.storage.merge(other.storage);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            player: PlayerConfig::default(),
            insight: InsightConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_version_is_set() {
        assert_eq!(Config::default().version, CONFIG_VERSION);
    }

    #[test]
    fn test_errors_collected_across_sections() {
        let mut config = Config::default();
        config.player.default_speed = 5.0;
        config.insight.model = String::new();
        assert_eq!(config.validate().unwrap_err().len(), 2);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.player.skip_forward_secs = 45;
        base.merge(other);
        assert_eq!(base.player.skip_forward_secs, 45);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[player]\ndefault_speed = 1.5\n").unwrap();
        assert_eq!(config.player.default_speed, 1.5);
        assert_eq!(config.player.skip_back_secs, 15);
        assert_eq!(config.insight, InsightConfig::default());
    }
}
