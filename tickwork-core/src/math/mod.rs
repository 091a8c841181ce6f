//! Heading math and drive command types
//!
//! Everything here is pure arithmetic usable from `no_std`.

pub mod angle;
pub mod pose;

pub use angle::{abs, wrap_angle};
pub use pose::{DrivePowers, Pose};
