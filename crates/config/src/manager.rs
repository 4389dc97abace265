//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "auralis";
const CONFIG_FILE: &str = "config.toml";

/// Loads, saves and locates the Auralis configuration
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager rooted at the platform config directory
    ///
    /// - Linux: `~/.config/auralis/`
    /// - macOS: `~/Library/Application Support/auralis/`
    /// - Windows: `%APPDATA%\auralis\`
    pub fn new() -> ConfigResult<Self> {
        let dirs = project_dirs()?;
        Self::with_directory(dirs.config_dir().to_path_buf())
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    /// Returns the platform data directory used when `storage.data_dir` is unset
    pub fn default_data_dir() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Loads the configuration, defaults when the file is missing
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, logging and falling back to defaults on error
    pub fn load_or_default(&self) -> Config {
        match self.load_with_env_overrides() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Validates and saves the configuration
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, applies `update_fn` and saves the result
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if none exists
    ///
    /// Returns `Ok(true)` if a new file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::debug!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.save(&Config::default())?;
        Ok(true)
    }

    /// Resolves the directory of the file-backed library store
    pub fn data_dir(&self, config: &Config) -> ConfigResult<PathBuf> {
        match &config.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Loads the file and applies `AURALIS_<SECTION>_<FIELD>` overrides
    ///
    /// Supported: `AURALIS_PLAYER_DEFAULT_SPEED`,
    /// `AURALIS_PLAYER_DEFAULT_VOLUME`, `AURALIS_INSIGHT_MODEL`,
    /// `AURALIS_STORAGE_DATA_DIR`.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;

        if let Ok(speed) = std::env::var("AURALIS_PLAYER_DEFAULT_SPEED") {
            match speed.parse::<f32>() {
                Ok(s) => config.player.default_speed = s,
                Err(_) => log::warn!("Ignoring unparsable AURALIS_PLAYER_DEFAULT_SPEED={}", speed),
            }
        }

        if let Ok(volume) = std::env::var("AURALIS_PLAYER_DEFAULT_VOLUME") {
            match volume.parse::<u8>() {
                Ok(v) => config.player.default_volume = v,
                Err(_) => {
                    log::warn!("Ignoring unparsable AURALIS_PLAYER_DEFAULT_VOLUME={}", volume)
                }
            }
        }

        if let Ok(model) = std::env::var("AURALIS_INSIGHT_MODEL") {
            config.insight.model = model;
        }

        if let Ok(dir) = std::env::var("AURALIS_STORAGE_DATA_DIR") {
            config.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Err(errors) = config.validate() {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::ValidationError(joined));
        }

        Ok(config)
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or_else(|| ConfigError::PathResolutionError {
        reason: "Could not determine user home directory".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let (_temp_dir, manager) = setup_test_manager();
        let config = manager.load_or_default();
        assert_eq!(config.player, Config::default().player);
    }

    #[test]
    fn test_load_or_default_with_corrupt_file() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(manager.config_path(), "[player\n").expect("write");
        let config = manager.load_or_default();
        assert_eq!(config.player, Config::default().player);
    }

    #[test]
    fn test_update() {
        let (_temp_dir, manager) = setup_test_manager();
        manager
            .update(|config| config.player.skip_back_secs = 10)
            .expect("Should update");
        assert_eq!(manager.load().expect("load").player.skip_back_secs, 10);
    }

    #[test]
    fn test_initialize_only_once() {
        let (_temp_dir, manager) = setup_test_manager();
        assert!(manager.initialize().expect("init"));
        assert!(!manager.initialize().expect("init again"));
    }

    #[test]
    fn test_data_dir_prefers_configured_path() {
        let (temp_dir, manager) = setup_test_manager();
        let mut config = Config::default();
        config.storage.data_dir = Some(temp_dir.path().join("store"));
        assert_eq!(
            manager.data_dir(&config).expect("dir"),
            temp_dir.path().join("store")
        );
    }

    #[test]
    fn test_config_file_path() {
        let (temp_dir, manager) = setup_test_manager();
        assert_eq!(manager.config_path(), temp_dir.path().join("config.toml"));
        assert_eq!(manager.config_dir(), &temp_dir.path().to_path_buf());
    }
}
