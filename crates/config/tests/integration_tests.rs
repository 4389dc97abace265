//! Integration tests for the configuration system

use auralis_config::{Config, ConfigManager, CONFIG_VERSION};
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    assert!(manager.initialize()?);

    let config = manager.load()?;
    assert_eq!(config.version, CONFIG_VERSION);

    let mut modified = config.clone();
    modified.player.default_speed = 1.25;
    modified.player.sleep_timer_presets = vec![10, 20];
    modified.insight.language = "Spanish".to_string();
    manager.save(&modified)?;

    let reloaded = manager.load()?;
    assert_eq!(reloaded.player.default_speed, 1.25);
    assert_eq!(reloaded.player.sleep_timer_presets, vec![10, 20]);
    assert_eq!(reloaded.insight.language, "Spanish");

    Ok(())
}

#[test]
fn test_invalid_config_not_written() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.save(&Config::default())?;

    let mut invalid = Config::default();
    invalid.player.progress_threshold_secs = -1.0;
    assert!(manager.save(&invalid).is_err());

    assert_eq!(manager.load()?, Config::default());
    Ok(())
}

#[test]
fn test_atomic_save_leaves_no_temp_files() -> Result<(), Box<dyn std::error::Error>> {
    let (temp_dir, manager) = setup_test_manager()?;

    for skip in [5u32, 10, 20] {
        manager.update(|c| c.player.skip_forward_secs = skip)?;
    }

    let entries: Vec<_> = std::fs::read_dir(temp_dir.path())?.collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(manager.load()?.player.skip_forward_secs, 20);
    Ok(())
}
