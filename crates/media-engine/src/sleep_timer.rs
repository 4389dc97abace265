//! Sleep timer countdown, advanced only while playing

/// Remaining time kept in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SleepTimer {
    remaining_secs: Option<u32>,
}

impl SleepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a countdown of `minutes`, `None` or zero turns it off
    pub fn set(&mut self, minutes: Option<u32>) {
        self.remaining_secs = minutes.filter(|m| *m > 0).map(|m| m.saturating_mul(60));
    }

    pub fn clear(&mut self) {
        self.remaining_secs = None;
    }

    pub fn is_set(&self) -> bool {
        self.remaining_secs.is_some()
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    /// Remaining minutes, fractional
    pub fn remaining_minutes(&self) -> Option<f64> {
        self.remaining_secs.map(|s| f64::from(s) / 60.0)
    }

    /// Consumes one second; returns true when the countdown hits zero
    ///
    /// An expired timer is cleared.
    pub fn tick(&mut self) -> bool {
        match self.remaining_secs {
            Some(secs) if secs <= 1 => {
                self.remaining_secs = None;
                true
            }
            Some(secs) => {
                self.remaining_secs = Some(secs - 1);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut timer = SleepTimer::new();
        timer.set(Some(15));
        assert_eq!(timer.remaining_secs(), Some(900));
        assert_eq!(timer.remaining_minutes(), Some(15.0));

        timer.set(Some(0));
        assert!(!timer.is_set());
    }

    #[test]
    fn test_counts_down_to_zero() {
        let mut timer = SleepTimer::new();
        timer.set(Some(1));
        for _ in 0..59 {
            assert!(!timer.tick());
        }
        assert!(timer.tick());
        assert!(!timer.is_set());
        assert!(!timer.tick());
    }
}
