//! Turn to a heading, release the block, verify the release, then wait
//!
//! Phases:
//!
//! - `Turning`: proportional turn toward the target heading. On arrival the
//!   block is released before the drive is stopped, so the robot is not
//!   sliding while the claw opens.
//! - `Checking`: after a settle delay the tray sensor is sampled. A block
//!   still present means the release failed; the grab choreography is
//!   replayed through the action cache and the check repeats, without limit.
//! - `Waiting`: the latches are raised and the robot holds still briefly
//!   before reporting completion.

use core::mem;

use crate::actions::ActionId;
use crate::config::{ManeuverTuning, TuningError};
use crate::math::{abs, wrap_angle, DrivePowers};
use crate::scheduler::{Maneuver, StepContext, StepStatus};
use crate::traits::{Millis, Robot};

/// One deferred step of the release-retry choreography
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryStep {
    /// Delay from the failed check (ms)
    pub offset_ms: i64,
    /// Action to fire
    pub action: ActionId,
}

impl RetryStep {
    const fn new(offset_ms: i64, action: ActionId) -> Self {
        Self { offset_ms, action }
    }
}

/// Choreography replayed after a failed release
///
/// Re-catches the block exactly the way it was first grabbed, then drops it
/// again. Offsets restart from each failed check; a batch in flight can only
/// be replaced wholesale.
pub const RETRY_SEQUENCE: [RetryStep; 7] = [
    RetryStep::new(0, ActionId::ReadyGrab),
    RetryStep::new(500, ActionId::CloseClaw),
    RetryStep::new(1000, ActionId::FlipperExtend),
    RetryStep::new(1000, ActionId::OpenClaw),
    RetryStep::new(1250, ActionId::LiftALittle),
    RetryStep::new(1750, ActionId::FlipperIntake),
    RetryStep::new(1750, ActionId::LowerLiftToGrab),
];

/// Maneuver phase
///
/// Deadlines live in the phase that uses them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Rotating toward the target heading
    Turning,
    /// Block released; sampling the tray once `check_at_ms` has passed
    Checking { check_at_ms: Millis },
    /// Release confirmed; finishing once `drive_away_at_ms` has passed
    Waiting { drive_away_at_ms: Millis },
    /// Finished
    Done,
}

impl Phase {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Turning => "turning",
            Phase::Checking { .. } => "checking",
            Phase::Waiting { .. } => "waiting",
            Phase::Done => "done",
        }
    }
}

/// Turn to a heading and drop the carried block
#[derive(Debug, Clone)]
pub struct TurnAndDrop {
    target_heading: f64,
    allowed_error: f64,
    tuning: ManeuverTuning,
    phase: Phase,
    retries: u32,
}

impl TurnAndDrop {
    /// Create the maneuver with default tuning
    pub fn new(target_heading: f64, allowed_error: f64) -> Self {
        Self::build(target_heading, allowed_error, ManeuverTuning::default())
    }

    /// Create the maneuver with explicit tuning
    ///
    /// Fails if the tuning cannot produce a finite turn power.
    pub fn with_tuning(
        target_heading: f64,
        allowed_error: f64,
        tuning: ManeuverTuning,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(target_heading, allowed_error, tuning))
    }

    fn build(target_heading: f64, allowed_error: f64, tuning: ManeuverTuning) -> Self {
        Self {
            target_heading,
            allowed_error,
            tuning,
            phase: Phase::Turning,
            retries: 0,
        }
    }

    /// Target heading (radians)
    pub fn target_heading(&self) -> f64 {
        self.target_heading
    }

    /// Arrival tolerance (radians)
    pub fn allowed_error(&self) -> f64 {
        self.allowed_error
    }

    /// Active tunables
    pub fn tuning(&self) -> &ManeuverTuning {
        &self.tuning
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of failed release checks so far
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Check if the maneuver has finished
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Turn power for the current heading
    ///
    /// Proportional to the wrapped heading error; saturation is left to the
    /// drivetrain.
    pub fn turn_power(&self, current_heading: f64) -> f64 {
        wrap_angle(self.target_heading - current_heading) / self.tuning.reduction_dist
    }

    fn step_turning<R: Robot + ?Sized>(
        &mut self,
        robot: &mut R,
        ctx: &mut StepContext<'_, '_, R>,
    ) -> Phase {
        let heading = robot.pose().heading;
        robot.set_powers(DrivePowers::turn_only(self.turn_power(heading)));

        // NaN heading or tolerance never counts as arrival
        let arrived = abs(heading - self.target_heading) < self.allowed_error;
        if !arrived {
            return Phase::Turning;
        }

        // Release while the drive still holds position, then stop
        ctx.run(ActionId::SmartDrop, robot);
        robot.stop();

        Phase::Checking {
            check_at_ms: ctx
                .now_ms()
                .saturating_add(self.tuning.time_until_first_check_ms),
        }
    }

    fn step_checking<R: Robot + ?Sized>(
        &mut self,
        check_at_ms: Millis,
        robot: &mut R,
        ctx: &mut StepContext<'_, '_, R>,
    ) -> Phase {
        let now_ms = ctx.now_ms();
        if now_ms <= check_at_ms {
            return Phase::Checking { check_at_ms };
        }

        if !robot.has_held_object() {
            ctx.run(ActionId::LatchesUp, robot);
            return Phase::Waiting {
                drive_away_at_ms: now_ms.saturating_add(self.tuning.time_until_drive_away_ms),
            };
        }

        self.retries = self.retries.saturating_add(1);
        warn!("block still held, retry {}", self.retries);

        let check_at_ms = now_ms.saturating_add(self.tuning.time_until_subsequent_checks_ms);
        ctx.clear_pending();
        for step in RETRY_SEQUENCE {
            if let Err(err) = ctx.schedule(step.action, step.offset_ms) {
                warn!("retry truncated at {}: {:?}", step.action.name(), err);
                break;
            }
        }

        Phase::Checking { check_at_ms }
    }

    fn step_waiting(drive_away_at_ms: Millis, now_ms: Millis) -> Phase {
        if now_ms > drive_away_at_ms {
            Phase::Done
        } else {
            Phase::Waiting { drive_away_at_ms }
        }
    }
}

impl<R: Robot + ?Sized> Maneuver<R> for TurnAndDrop {
    fn step(&mut self, robot: &mut R, ctx: &mut StepContext<'_, '_, R>) -> StepStatus {
        let previous = self.phase;
        self.phase = match previous {
            Phase::Turning => self.step_turning(robot, ctx),
            Phase::Checking { check_at_ms } => self.step_checking(check_at_ms, robot, ctx),
            Phase::Waiting { drive_away_at_ms } => {
                Self::step_waiting(drive_away_at_ms, ctx.now_ms())
            }
            Phase::Done => Phase::Done,
        };

        if mem::discriminant(&previous) != mem::discriminant(&self.phase) {
            info!(
                "turn_and_drop: {} -> {} at {} ms",
                previous.name(),
                self.phase.name(),
                ctx.now_ms()
            );
        }

        if self.is_done() {
            StepStatus::Done
        } else {
            StepStatus::Running
        }
    }

    fn name(&self) -> &'static str {
        "turn_and_drop"
    }
}
