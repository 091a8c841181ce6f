//! Named one-shot actions
//!
//! The reusable actions a maneuver may run immediately or defer through the
//! action cache. They are addressed by [`ActionId`] and resolved through an
//! [`ActionTable`] built once at startup and passed by reference to whoever
//! needs it.

pub mod builtin;

use core::fmt;

use crate::scheduler::OneShot;
use crate::traits::Robot;

pub use builtin::{
    CloseClaw, FlipperExtend, FlipperIntake, LatchesUp, LiftALittle, LowerLiftToGrab, OpenClaw,
    ReadyGrab, SmartDrop,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a reusable one-shot action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ActionId {
    /// Release the carried block
    SmartDrop = 0,
    /// Open the claw, drop the lift to layer 0 and lower the flipper
    ReadyGrab = 1,
    /// Close the claw
    CloseClaw = 2,
    /// Open the claw
    OpenClaw = 3,
    /// Swing the flipper out
    FlipperExtend = 4,
    /// Tuck the flipper in for intaking
    FlipperIntake = 5,
    /// Raise the lift slightly
    LiftALittle = 6,
    /// Lower the lift to grabbing height
    LowerLiftToGrab = 7,
    /// Raise the foundation latches
    LatchesUp = 8,
}

impl ActionId {
    /// Number of distinct actions
    pub const COUNT: usize = 9;

    /// Every action, in table order
    pub const ALL: [ActionId; Self::COUNT] = [
        ActionId::SmartDrop,
        ActionId::ReadyGrab,
        ActionId::CloseClaw,
        ActionId::OpenClaw,
        ActionId::FlipperExtend,
        ActionId::FlipperIntake,
        ActionId::LiftALittle,
        ActionId::LowerLiftToGrab,
        ActionId::LatchesUp,
    ];

    /// Stable name for logs and reports
    pub const fn name(self) -> &'static str {
        match self {
            ActionId::SmartDrop => "smart_drop",
            ActionId::ReadyGrab => "ready_grab",
            ActionId::CloseClaw => "close_claw",
            ActionId::OpenClaw => "open_claw",
            ActionId::FlipperExtend => "flipper_extend",
            ActionId::FlipperIntake => "flipper_intake",
            ActionId::LiftALittle => "lift_a_little",
            ActionId::LowerLiftToGrab => "lower_lift_to_grab",
            ActionId::LatchesUp => "latches_up",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Table binding every [`ActionId`] to an implementation
///
/// Built once at startup and shared by reference with the scheduler and the
/// maneuvers it drives.
pub struct ActionTable<'a, R: ?Sized> {
    entries: [&'a dyn OneShot<R>; ActionId::COUNT],
}

impl<'a, R: Robot + ?Sized + 'a> ActionTable<'a, R> {
    /// Table of the built-in actions
    pub fn standard() -> Self {
        let entries: [&'a dyn OneShot<R>; ActionId::COUNT] = [
            &SmartDrop,
            &ReadyGrab,
            &CloseClaw,
            &OpenClaw,
            &FlipperExtend,
            &FlipperIntake,
            &LiftALittle,
            &LowerLiftToGrab,
            &LatchesUp,
        ];
        Self { entries }
    }
}

impl<'a, R: ?Sized> ActionTable<'a, R> {
    /// Replace the implementation bound to `id`
    pub fn bind(&mut self, id: ActionId, action: &'a dyn OneShot<R>) {
        self.entries[id.index()] = action;
    }

    /// Look up the implementation bound to `id`
    pub fn get(&self, id: ActionId) -> &'a dyn OneShot<R> {
        self.entries[id.index()]
    }

    /// Run the action bound to `id` to completion
    pub fn run(&self, id: ActionId, robot: &mut R) {
        trace!("run action {}", id.name());
        self.get(id).run_once(robot);
    }
}

impl<'a, R: ?Sized> fmt::Debug for ActionTable<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|action| action.name()))
            .finish()
    }
}
