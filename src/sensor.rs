//! Turns raw accelerometer readings into debounced new-game requests.

use std::time::{Duration, Instant};

use crate::input::{Input, NewGameReason};

/// Acceleration magnitude, in g, above which a reading counts as a shake.
pub const SHAKE_THRESHOLD: f64 = 1.8;

/// Minimum time between two accepted shakes.
pub const SHAKE_DEBOUNCE: Duration = Duration::from_millis(2200);

#[derive(Debug, Clone)]
pub struct ShakeDetector {
    threshold: f64,
    debounce: Duration,
    last_accepted: Option<Instant>,
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self::with_settings(SHAKE_THRESHOLD, SHAKE_DEBOUNCE)
    }

    pub fn with_settings(threshold: f64, debounce: Duration) -> Self {
        Self {
            threshold,
            debounce,
            last_accepted: None,
        }
    }

    pub fn magnitude([x, y, z]: [f64; 3]) -> f64 {
        (x * x + y * y + z * z).sqrt()
    }

    /// Feed one reading taken at `at`. Yields a sensor new-game request when
    /// the reading is a shake and the previous accepted shake is at least the
    /// debounce interval old.
    pub fn sample(&mut self, reading: [f64; 3], at: Instant) -> Option<Input> {
        if Self::magnitude(reading) <= self.threshold {
            return None;
        }

        if let Some(last) = self.last_accepted {
            if at.saturating_duration_since(last) < self.debounce {
                log::trace!("Ignoring shake within debounce interval");
                return None;
            }
        }

        self.last_accepted = Some(at);
        log::debug!("Shake accepted");
        Some(Input::NewGame(NewGameReason::Sensor))
    }
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SHAKE: [f64; 3] = [1.5, 1.2, 0.5];
    const REST: [f64; 3] = [0.0, 0.0, 1.0];

    #[test]
    fn test_threshold() {
        let mut detector = ShakeDetector::new();
        let now = Instant::now();

        assert_eq!(detector.sample(REST, now), None);
        assert_eq!(detector.sample([0.0, 1.0, 1.4], now), None);
        assert_eq!(
            detector.sample(SHAKE, now),
            Some(Input::NewGame(NewGameReason::Sensor))
        );
    }

    #[test]
    fn test_debounce() {
        let mut detector = ShakeDetector::new();
        let start = Instant::now();

        assert!(detector.sample(SHAKE, start).is_some());
        assert!(detector.sample(SHAKE, start + Duration::from_millis(100)).is_none());
        assert!(detector.sample(SHAKE, start + Duration::from_millis(2199)).is_none());
        assert!(detector.sample(SHAKE, start + SHAKE_DEBOUNCE).is_some());

        // Measured from the last accepted shake, not the last reading.
        let second = start + SHAKE_DEBOUNCE;
        assert!(detector.sample(SHAKE, second + Duration::from_millis(2000)).is_none());
        assert!(detector.sample(SHAKE, second + Duration::from_millis(2200)).is_some());
    }
}
