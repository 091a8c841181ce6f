//! Maneuver tunables
//!
//! These values are adjusted on the field, not in code.

use core::f64::consts::PI;
use core::fmt;

use crate::traits::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default angular distance over which turn power tapers (radians)
pub const DEFAULT_REDUCTION_DIST: f64 = PI / 3.0;

/// Default settle time before the first release check
pub const DEFAULT_TIME_UNTIL_FIRST_CHECK_MS: Millis = 1500;

/// Default interval between release checks after a failure
pub const DEFAULT_TIME_UNTIL_SUBSEQUENT_CHECKS_MS: Millis = 2000;

/// Default hold time after a confirmed release
pub const DEFAULT_TIME_UNTIL_DRIVE_AWAY_MS: Millis = 500;

/// Tunables for the turn-and-drop maneuver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManeuverTuning {
    /// Heading error (radians) that maps to full turn power
    pub reduction_dist: f64,
    /// Delay from release to the first held-object check (ms)
    pub time_until_first_check_ms: Millis,
    /// Delay between checks after a failed release (ms)
    pub time_until_subsequent_checks_ms: Millis,
    /// Delay from a confirmed release to completion (ms)
    pub time_until_drive_away_ms: Millis,
}

impl Default for ManeuverTuning {
    fn default() -> Self {
        Self {
            reduction_dist: DEFAULT_REDUCTION_DIST,
            time_until_first_check_ms: DEFAULT_TIME_UNTIL_FIRST_CHECK_MS,
            time_until_subsequent_checks_ms: DEFAULT_TIME_UNTIL_SUBSEQUENT_CHECKS_MS,
            time_until_drive_away_ms: DEFAULT_TIME_UNTIL_DRIVE_AWAY_MS,
        }
    }
}

impl ManeuverTuning {
    /// Check that the tunables can drive a maneuver
    pub fn validate(&self) -> Result<(), TuningError> {
        if !self.reduction_dist.is_finite() {
            return Err(TuningError::NonFiniteReductionDistance);
        }
        if self.reduction_dist <= 0.0 {
            return Err(TuningError::NonPositiveReductionDistance);
        }
        Ok(())
    }
}

/// Rejected tunable values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningError {
    /// Reduction distance is zero or negative
    NonPositiveReductionDistance,
    /// Reduction distance is NaN or infinite
    NonFiniteReductionDistance,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NonPositiveReductionDistance => {
                write!(f, "reduction distance must be positive")
            }
            TuningError::NonFiniteReductionDistance => {
                write!(f, "reduction distance must be finite")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuning = ManeuverTuning::default();
        assert_eq!(tuning.reduction_dist, PI / 3.0);
        assert_eq!(tuning.time_until_first_check_ms, 1500);
        assert_eq!(tuning.time_until_subsequent_checks_ms, 2000);
        assert_eq!(tuning.time_until_drive_away_ms, 500);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_reduction_dist() {
        let tuning = ManeuverTuning {
            reduction_dist: 0.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonPositiveReductionDistance)
        );
    }

    #[test]
    fn test_rejects_nan_reduction_dist() {
        let tuning = ManeuverTuning {
            reduction_dist: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFiniteReductionDistance)
        );
    }
}
