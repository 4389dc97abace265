//! Volume with an independent mute flag

/// Stored volume in `[0, 1]` plus mute
///
/// Muting never touches the stored level and changing the level never
/// unmutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeControl {
    level: f32,
    muted: bool,
}

impl VolumeControl {
    pub fn new(level: f32) -> Self {
        let mut control = Self::default();
        control.set_level(level);
        control
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Clamps into `[0, 1]`; non-finite input is ignored
    pub fn set_level(&mut self, level: f32) {
        if level.is_finite() {
            self.level = level.clamp(0.0, 1.0);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Volume applied to the output
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self {
            level: 1.0,
            muted: false,
        }
    }
}
