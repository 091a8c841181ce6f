//! Built-in one-shot actions
//!
//! Each is a zero-sized command bundle over the robot traits.

use crate::scheduler::OneShot;
use crate::traits::{FlipperPosition, Robot};

/// Release the carried block
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartDrop;

impl<R: Robot + ?Sized> OneShot<R> for SmartDrop {
    fn run_once(&self, robot: &mut R) {
        robot.open();
    }

    fn name(&self) -> &'static str {
        "smart_drop"
    }
}

/// Reset the mechanisms for a fresh grab from the tray
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyGrab;

impl<R: Robot + ?Sized> OneShot<R> for ReadyGrab {
    fn run_once(&self, robot: &mut R) {
        robot.set_layer(0);
        robot.retract();
        robot.set_position(FlipperPosition::ReadyForGrab);
    }

    fn name(&self) -> &'static str {
        "ready_grab"
    }
}

/// Close the claw
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseClaw;

impl<R: Robot + ?Sized> OneShot<R> for CloseClaw {
    fn run_once(&self, robot: &mut R) {
        robot.close();
    }

    fn name(&self) -> &'static str {
        "close_claw"
    }
}

/// Open the claw
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenClaw;

impl<R: Robot + ?Sized> OneShot<R> for OpenClaw {
    fn run_once(&self, robot: &mut R) {
        robot.open();
    }

    fn name(&self) -> &'static str {
        "open_claw"
    }
}

/// Swing the flipper out
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipperExtend;

impl<R: Robot + ?Sized> OneShot<R> for FlipperExtend {
    fn run_once(&self, robot: &mut R) {
        robot.set_position(FlipperPosition::Extended);
    }

    fn name(&self) -> &'static str {
        "flipper_extend"
    }
}

/// Tuck the flipper in
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipperIntake;

impl<R: Robot + ?Sized> OneShot<R> for FlipperIntake {
    fn run_once(&self, robot: &mut R) {
        robot.set_position(FlipperPosition::Intake);
    }

    fn name(&self) -> &'static str {
        "flipper_intake"
    }
}

/// Raise the lift slightly
#[derive(Debug, Clone, Copy, Default)]
pub struct LiftALittle;

impl<R: Robot + ?Sized> OneShot<R> for LiftALittle {
    fn run_once(&self, robot: &mut R) {
        robot.nudge_up();
    }

    fn name(&self) -> &'static str {
        "lift_a_little"
    }
}

/// Lower the lift to grabbing height
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerLiftToGrab;

impl<R: Robot + ?Sized> OneShot<R> for LowerLiftToGrab {
    fn run_once(&self, robot: &mut R) {
        robot.lower_to_grab();
    }

    fn name(&self) -> &'static str {
        "lower_lift_to_grab"
    }
}

/// Raise the foundation latches
#[derive(Debug, Clone, Copy, Default)]
pub struct LatchesUp;

impl<R: Robot + ?Sized> OneShot<R> for LatchesUp {
    fn run_once(&self, robot: &mut R) {
        robot.latches_up();
    }

    fn name(&self) -> &'static str {
        "latches_up"
    }
}
