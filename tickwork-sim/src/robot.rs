//! Simulated robot
//!
//! Heading is integrated from the last commanded turn power on each call to
//! [`SimRobot::update`], the way a motor driver is advanced once per period.
//! Every actuator command is recorded with the simulated time it was issued.

use serde::Serialize;

use tickwork_core::math::{DrivePowers, Pose};
use tickwork_core::traits::{
    Drivetrain, Flipper, FlipperPosition, Gripper, Latches, Lift, Millis, TraySensor,
};

/// Actuator command issued to the simulated robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RobotCommand {
    Drive { forward: f64, strafe: f64, turn: f64 },
    SetLayer { layer: u8 },
    NudgeUp,
    LowerToGrab,
    Retract,
    Close,
    Open,
    Flipper { position: FlipperPosition },
    LatchesUp,
}

/// A recorded command
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedCommand {
    pub at_ms: Millis,
    #[serde(flatten)]
    pub command: RobotCommand,
}

/// Simulated drivetrain, mechanisms and tray sensor
#[derive(Debug, Clone)]
pub struct SimRobot {
    pose: Pose,
    powers: DrivePowers,
    /// Heading rate at full turn power (rad/s)
    turn_rate_rad_per_s: f64,
    /// Tray samples still reporting a block
    held_samples: u32,
    /// Tray samples taken so far
    samples: u32,
    now_ms: Millis,
    log: Vec<TimedCommand>,
}

impl SimRobot {
    /// Create a robot at `heading` whose tray reports a block for the first
    /// `held_samples` samples
    pub fn new(heading: f64, turn_rate_rad_per_s: f64, held_samples: u32) -> Self {
        Self {
            pose: Pose::new(0.0, 0.0, heading),
            powers: DrivePowers::STOP,
            turn_rate_rad_per_s,
            held_samples,
            samples: 0,
            now_ms: 0,
            log: Vec::new(),
        }
    }

    /// Advance the simulation to `now_ms`
    ///
    /// Turn power is clamped to [-1, 1] the way a motor controller saturates.
    pub fn update(&mut self, now_ms: Millis) {
        let dt_s = now_ms.saturating_sub(self.now_ms) as f64 / 1000.0;
        let turn = self.powers.turn.clamp(-1.0, 1.0);
        self.pose.heading += turn * self.turn_rate_rad_per_s * dt_s;
        self.now_ms = now_ms;
    }

    /// Last commanded drive powers
    pub fn powers(&self) -> DrivePowers {
        self.powers
    }

    /// Number of tray samples taken
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Commands issued so far, in order
    pub fn log(&self) -> &[TimedCommand] {
        &self.log
    }

    /// Consume the robot and return its command log
    pub fn into_log(self) -> Vec<TimedCommand> {
        self.log
    }

    fn record(&mut self, command: RobotCommand) {
        tracing::trace!(at_ms = self.now_ms, ?command, "robot command");
        self.log.push(TimedCommand {
            at_ms: self.now_ms,
            command,
        });
    }
}

impl Drivetrain for SimRobot {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_powers(&mut self, powers: DrivePowers) {
        self.powers = powers;
        self.record(RobotCommand::Drive {
            forward: powers.forward,
            strafe: powers.strafe,
            turn: powers.turn,
        });
    }
}

impl Lift for SimRobot {
    fn set_layer(&mut self, layer: u8) {
        self.record(RobotCommand::SetLayer { layer });
    }

    fn nudge_up(&mut self) {
        self.record(RobotCommand::NudgeUp);
    }

    fn lower_to_grab(&mut self) {
        self.record(RobotCommand::LowerToGrab);
    }
}

impl Gripper for SimRobot {
    fn retract(&mut self) {
        self.record(RobotCommand::Retract);
    }

    fn close(&mut self) {
        self.record(RobotCommand::Close);
    }

    fn open(&mut self) {
        self.record(RobotCommand::Open);
    }
}

impl Flipper for SimRobot {
    fn set_position(&mut self, position: FlipperPosition) {
        self.record(RobotCommand::Flipper { position });
    }
}

impl Latches for SimRobot {
    fn latches_up(&mut self) {
        self.record(RobotCommand::LatchesUp);
    }
}

impl TraySensor for SimRobot {
    fn has_held_object(&mut self) -> bool {
        self.samples += 1;
        if self.held_samples == 0 {
            return false;
        }
        self.held_samples -= 1;
        true
    }
}
