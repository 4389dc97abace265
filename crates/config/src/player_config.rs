//! Player configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Speed steps the player accepts
pub const SUPPORTED_SPEEDS: [f32; 5] = [0.75, 1.0, 1.25, 1.5, 2.0];

/// Player preferences and behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume level (0-100)
    pub default_volume: u8,

    /// Initial playback speed, one of `SUPPORTED_SPEEDS`
    pub default_speed: f32,

    /// Seconds jumped back by the rewind button
    pub skip_back_secs: u32,

    /// Seconds jumped forward by the skip button
    pub skip_forward_secs: u32,

    /// Minimum change before a progress report reaches the library
    pub progress_threshold_secs: f64,

    /// Sleep-timer choices offered to the user, in minutes
    pub sleep_timer_presets: Vec<u32>,
}

impl PlayerConfig {
    /// Initial volume as a `[0, 1]` gain
    pub fn volume_gain(&self) -> f32 {
        f32::from(self.default_volume.min(100)) / 100.0
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: 100,
            default_speed: 1.0,
            skip_back_secs: 15,
            skip_forward_secs: 30,
            progress_threshold_secs: 1.0,
            sleep_timer_presets: vec![15, 30, 45, 60],
        }
    }
}

impl ConfigSection for PlayerConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::in_range(self.default_volume, 0, 100, "player.default_volume"),
            Validator::one_of(&self.default_speed, &SUPPORTED_SPEEDS, "player.default_speed"),
            Validator::in_range(self.skip_back_secs, 1, 600, "player.skip_back_secs"),
            Validator::in_range(self.skip_forward_secs, 1, 600, "player.skip_forward_secs"),
            Validator::in_range(
                self.progress_threshold_secs,
                0.0,
                60.0,
                "player.progress_threshold_secs",
            ),
            Validator::each_in_range(
                &self.sleep_timer_presets,
                1,
                720,
                "player.sleep_timer_presets",
            ),
        ])
    }

    fn merge(&mut self, other: Self) {
        *self = other;
    }

    fn section_name(&self) -> &'static str {
        "player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_skip_amounts() {
        let config = PlayerConfig::default();
        assert_eq!(config.skip_back_secs, 15);
        assert_eq!(config.skip_forward_secs, 30);
        assert_eq!(config.sleep_timer_presets, vec![15, 30, 45, 60]);
    }

    #[test]
    fn test_invalid_speed() {
        let config = PlayerConfig {
            default_speed: 1.75,
            ..PlayerConfig::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].field, "player.default_speed");
    }

    #[test]
    fn test_invalid_volume_and_preset() {
        let config = PlayerConfig {
            default_volume: 101,
            sleep_timer_presets: vec![0],
            ..PlayerConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().len(), 2);
    }

    #[test]
    fn test_volume_gain() {
        let config = PlayerConfig {
            default_volume: 50,
            ..PlayerConfig::default()
        };
        assert_eq!(config.volume_gain(), 0.5);
    }
}
