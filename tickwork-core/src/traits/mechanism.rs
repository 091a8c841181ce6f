//! Mechanism traits
//!
//! Each call is a fire-and-forget command; the mechanism moves on its own
//! closed loop after the call returns.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Block flipper positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlipperPosition {
    /// Lowered over the tray, ready to grab a block
    ReadyForGrab,
    /// Swung out over the placement target
    Extended,
    /// Tucked in for intaking
    Intake,
}

/// Vertical lift
pub trait Lift {
    /// Move to a stacking layer (0 is the bottom)
    fn set_layer(&mut self, layer: u8);

    /// Raise slightly above the current target to clear a released block
    fn nudge_up(&mut self);

    /// Lower to the height used for grabbing from the tray
    fn lower_to_grab(&mut self);
}

/// Block claw on the flipper
pub trait Gripper {
    /// Pull the claw fully open and back
    fn retract(&mut self);

    /// Close on a block
    fn close(&mut self);

    /// Open to release a block
    fn open(&mut self);
}

/// Flipper arm carrying the gripper
pub trait Flipper {
    /// Move the arm to a position
    fn set_position(&mut self, position: FlipperPosition);
}

/// Foundation latches
pub trait Latches {
    /// Raise the latches off the foundation
    fn latches_up(&mut self);
}
