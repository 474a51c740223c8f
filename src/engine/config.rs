//! Engine configuration and the speed-to-period mapping.

use crate::error::{Error, Result};
use std::time::Duration;

/// Slowest accepted speed.
pub const MIN_SPEED: i32 = 1;
/// Fastest accepted speed.
pub const MAX_SPEED: i32 = 100;
/// Tick period at speed 1; higher speeds divide it.
pub const MAX_SPEED_TIME: Duration = Duration::from_millis(4000);
/// Caret blink half-period.
pub const CARET_TOGGLE_TIME: Duration = Duration::from_millis(500);

/// Clamp a speed into `[MIN_SPEED, MAX_SPEED]`.
#[inline]
pub const fn clamp_speed(speed: i32) -> i32 {
    if speed < MIN_SPEED {
        MIN_SPEED
    } else if speed > MAX_SPEED {
        MAX_SPEED
    } else {
        speed
    }
}

/// Tick period for a speed: `max_speed_time / clamp(speed)`.
#[inline]
pub fn tick_period(max_speed_time: Duration, speed: i32) -> Duration {
    max_speed_time / clamp_speed(speed).unsigned_abs()
}

/// Configuration for the typewriter engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Animation speed, clamped to `[1, 100]`.
    pub speed: i32,
    /// Tick period at speed 1.
    pub max_speed_time: Duration,
    /// Caret blink half-period while idle.
    pub caret_toggle: Duration,
    /// Whether stopping reverts gradient-colored units to the base color.
    pub revert_gradient_on_stop: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: 60,
            max_speed_time: MAX_SPEED_TIME,
            caret_toggle: CARET_TOGGLE_TIME,
            revert_gradient_on_stop: true,
        }
    }
}

impl EngineConfig {
    /// Set the speed (builder pattern).
    #[must_use]
    pub const fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the tick period at speed 1 (builder pattern).
    #[must_use]
    pub const fn with_max_speed_time(mut self, max_speed_time: Duration) -> Self {
        self.max_speed_time = max_speed_time;
        self
    }

    /// Set the caret blink half-period (builder pattern).
    #[must_use]
    pub const fn with_caret_toggle(mut self, caret_toggle: Duration) -> Self {
        self.caret_toggle = caret_toggle;
        self
    }

    /// Keep or revert gradient colors on stop (builder pattern).
    #[must_use]
    pub const fn with_revert_gradient_on_stop(mut self, revert: bool) -> Self {
        self.revert_gradient_on_stop = revert;
        self
    }

    /// The tick period derived from `speed` and `max_speed_time`.
    #[inline]
    pub fn period(&self) -> Duration {
        tick_period(self.max_speed_time, self.speed)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.period().is_zero() {
            return Err(Error::Configuration(format!(
                "max_speed_time {:?} yields a zero tick period",
                self.max_speed_time
            )));
        }
        if self.caret_toggle.is_zero() {
            return Err(Error::Configuration(
                "caret_toggle must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_period() {
        let config = EngineConfig::default();
        assert_eq!(config.period(), Duration::from_millis(4000) / 60);
    }

    #[test]
    fn test_speed_bounds() {
        assert_eq!(tick_period(MAX_SPEED_TIME, 0), Duration::from_millis(4000));
        assert_eq!(tick_period(MAX_SPEED_TIME, -20), Duration::from_millis(4000));
        assert_eq!(tick_period(MAX_SPEED_TIME, 100), Duration::from_millis(40));
        assert_eq!(tick_period(MAX_SPEED_TIME, 1000), Duration::from_millis(40));
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default()
            .with_max_speed_time(Duration::ZERO)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_caret_toggle(Duration::ZERO)
            .validate()
            .is_err());
    }

    proptest! {
        #[test]
        fn period_matches_formula(speed in any::<i32>()) {
            let clamped = speed.clamp(1, 100);
            let expected = MAX_SPEED_TIME / u32::try_from(clamped).unwrap();
            prop_assert_eq!(tick_period(MAX_SPEED_TIME, speed), expected);
        }

        #[test]
        fn faster_speed_never_slower(a in 1i32..=100, b in 1i32..=100) {
            let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tick_period(MAX_SPEED_TIME, fast) <= tick_period(MAX_SPEED_TIME, slow));
        }
    }
}
