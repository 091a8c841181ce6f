//! Drivetrain trait

use crate::math::{DrivePowers, Pose};

/// Drive base with pose feedback
///
/// Pose estimation and wheel kinematics live behind this trait.
pub trait Drivetrain {
    /// Latest pose estimate
    fn pose(&self) -> Pose;

    /// Apply a drive command
    ///
    /// Commands are absolute, not incremental: issuing the same powers every
    /// tick holds them.
    fn set_powers(&mut self, powers: DrivePowers);

    /// Stop all drive motors
    fn stop(&mut self) {
        self.set_powers(DrivePowers::STOP);
    }
}
