//! Coordinator tuning taken from the `[player]` config section

use auralis_config::PlayerConfig;
use auralis_core::PlaybackSpeed;
use media_engine::{AudioBackend, PlaybackEngine};

/// Behavior knobs of the coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorSettings {
    /// A progress report reaches the library only when it moved further than this
    pub progress_threshold_secs: f64,
    pub skip_back_secs: f64,
    pub skip_forward_secs: f64,
    pub sleep_timer_presets: Vec<u32>,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self::from(&PlayerConfig::default())
    }
}

impl From<&PlayerConfig> for CoordinatorSettings {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            progress_threshold_secs: config.progress_threshold_secs.max(0.0),
            skip_back_secs: f64::from(config.skip_back_secs),
            skip_forward_secs: f64::from(config.skip_forward_secs),
            sleep_timer_presets: config.sleep_timer_presets.clone(),
        }
    }
}

/// Creates an engine with the configured initial speed and volume
pub fn engine_from_config<B: AudioBackend>(backend: B, config: &PlayerConfig) -> PlaybackEngine<B> {
    let speed = PlaybackSpeed::from_value(config.default_speed).unwrap_or_else(|e| {
        log::warn!("{}, using {}", e, PlaybackSpeed::default());
        PlaybackSpeed::default()
    });
    PlaybackEngine::with_settings(backend, speed, config.volume_gain())
}
