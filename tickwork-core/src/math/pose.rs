//! Pose and drive power types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Field-relative robot pose
///
/// Positions are in inches, heading in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    /// Create a pose
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }
}

/// Robot-relative drive command
///
/// Converting these to per-wheel powers is the drivetrain's job.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrivePowers {
    /// Forward power
    pub forward: f64,
    /// Sideways power, positive to the left
    pub strafe: f64,
    /// Rotational power, positive counter-clockwise
    pub turn: f64,
}

impl DrivePowers {
    /// All-zero command
    pub const STOP: Self = Self {
        forward: 0.0,
        strafe: 0.0,
        turn: 0.0,
    };

    /// Rotate in place
    pub const fn turn_only(turn: f64) -> Self {
        Self {
            forward: 0.0,
            strafe: 0.0,
            turn,
        }
    }

    /// Check whether this command stops the drive
    pub fn is_stop(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.turn == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_only_has_no_translation() {
        let powers = DrivePowers::turn_only(0.4);
        assert_eq!(powers.forward, 0.0);
        assert_eq!(powers.strafe, 0.0);
        assert_eq!(powers.turn, 0.4);
        assert!(!powers.is_stop());
    }

    #[test]
    fn test_stop() {
        assert!(DrivePowers::STOP.is_stop());
        assert_eq!(DrivePowers::default(), DrivePowers::STOP);
    }
}
