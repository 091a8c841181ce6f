//! Robot boundary traits
//!
//! These traits define the interface between the maneuver engine and the
//! hardware-specific implementations of the drivetrain, mechanisms, sensors
//! and time source.

pub mod clock;
pub mod drive;
pub mod mechanism;
pub mod sensor;

pub use clock::{Clock, ManualClock, Millis};
pub use drive::Drivetrain;
pub use mechanism::{Flipper, FlipperPosition, Gripper, Latches, Lift};
pub use sensor::TraySensor;

/// Full capability set a maneuver may command
///
/// Implemented automatically for anything that provides every part.
pub trait Robot: Drivetrain + Lift + Gripper + Flipper + Latches + TraySensor {}

impl<T> Robot for T where T: Drivetrain + Lift + Gripper + Flipper + Latches + TraySensor + ?Sized {}
