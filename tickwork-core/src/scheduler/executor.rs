//! Tick executor
//!
//! Owns the action cache and the active maneuver. Each tick samples the
//! clock once, fires every due deferred action, then steps the maneuver.
//! Actions the maneuver defers during its step therefore fire on a later
//! tick at the earliest.

use core::fmt;

use super::cache::ActionCache;
use super::subroutine::{Maneuver, StepContext};
use crate::actions::ActionTable;
use crate::traits::{Clock, Millis};

/// Events reported to the plan sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerEvent {
    /// The active maneuver finished and was detached
    ManeuverFinished {
        /// Name of the finished maneuver
        name: &'static str,
        /// Tick time at which it finished
        at_ms: Millis,
    },
}

/// Errors from scheduler control operations
#[derive(Debug, PartialEq)]
pub enum SchedulerError<M> {
    /// A maneuver is already active; the rejected one is handed back
    Busy(M),
}

impl<M> SchedulerError<M> {
    /// Recover the rejected maneuver
    pub fn into_inner(self) -> M {
        match self {
            SchedulerError::Busy(maneuver) => maneuver,
        }
    }
}

impl<M> fmt::Display for SchedulerError<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::Busy(_) => write!(f, "a maneuver is already active"),
        }
    }
}

/// Cooperative tick scheduler
///
/// Call [`tick`](Self::tick) once per control-loop period. A tick never
/// blocks and always returns in bounded time.
pub struct TickScheduler<'a, R: ?Sized, M, C> {
    /// Injected time source
    clock: C,
    /// Named one-shot actions
    actions: &'a ActionTable<'a, R>,
    /// Deferred actions
    cache: ActionCache,
    /// Maneuver being stepped, if any
    active: Option<M>,
    /// Ticks executed so far
    ticks: u32,
}

impl<'a, R, M, C> TickScheduler<'a, R, M, C>
where
    R: ?Sized,
    M: Maneuver<R>,
    C: Clock,
{
    /// Create an idle scheduler
    pub fn new(clock: C, actions: &'a ActionTable<'a, R>) -> Self {
        Self {
            clock,
            actions,
            cache: ActionCache::new(),
            active: None,
            ticks: 0,
        }
    }

    /// Install a maneuver to be stepped from the next tick
    ///
    /// Fails if another maneuver is still active.
    pub fn start(&mut self, maneuver: M) -> Result<(), SchedulerError<M>> {
        if self.active.is_some() {
            warn!("rejected {}: scheduler busy", maneuver.name());
            return Err(SchedulerError::Busy(maneuver));
        }

        info!("starting {}", maneuver.name());
        self.active = Some(maneuver);
        Ok(())
    }

    /// Detach the active maneuver and discard every deferred action
    pub fn abort(&mut self) -> Option<M> {
        let discarded = self.cache.clear();
        let maneuver = self.active.take();
        if let Some(maneuver) = &maneuver {
            info!(
                "aborted {} ({} pending actions discarded)",
                maneuver.name(),
                discarded
            );
        }
        maneuver
    }

    /// Run one control-loop tick
    ///
    /// Returns an event when the active maneuver finishes.
    pub fn tick(&mut self, robot: &mut R) -> Option<SchedulerEvent> {
        let now_ms = self.clock.now_ms();
        self.ticks = self.ticks.wrapping_add(1);

        let fired = self.cache.tick(now_ms, self.actions, robot);
        if fired > 0 {
            trace!("tick {}: fired {} actions", self.ticks, fired);
        }

        let maneuver = self.active.as_mut()?;
        let mut ctx = StepContext::new(now_ms, &mut self.cache, self.actions);
        if !maneuver.step(robot, &mut ctx).is_done() {
            return None;
        }

        let name = maneuver.name();
        self.active = None;
        info!("{} finished at {} ms", name, now_ms);
        Some(SchedulerEvent::ManeuverFinished {
            name,
            at_ms: now_ms,
        })
    }

    /// Check if no maneuver is active
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// The active maneuver, if any
    pub fn active(&self) -> Option<&M> {
        self.active.as_ref()
    }

    /// Deferred actions not yet fired
    pub fn pending(&self) -> &ActionCache {
        &self.cache
    }

    /// The injected clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of ticks executed
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionId;
    use crate::math::{DrivePowers, Pose};
    use crate::scheduler::StepStatus;
    use crate::traits::{
        Drivetrain, Flipper, FlipperPosition, Gripper, Latches, Lift, ManualClock, TraySensor,
    };
    use std::vec::Vec;

    /// Records mechanism commands as action names
    #[derive(Default)]
    struct LogRobot {
        log: Vec<&'static str>,
    }

    impl Drivetrain for LogRobot {
        fn pose(&self) -> Pose {
            Pose::default()
        }
        fn set_powers(&mut self, _: DrivePowers) {
            self.log.push("drive");
        }
    }

    impl Lift for LogRobot {
        fn set_layer(&mut self, _: u8) {}
        fn nudge_up(&mut self) {}
        fn lower_to_grab(&mut self) {}
    }

    impl Gripper for LogRobot {
        fn retract(&mut self) {}
        fn close(&mut self) {
            self.log.push("close");
        }
        fn open(&mut self) {
            self.log.push("open");
        }
    }

    impl Flipper for LogRobot {
        fn set_position(&mut self, _: FlipperPosition) {}
    }

    impl Latches for LogRobot {
        fn latches_up(&mut self) {}
    }

    impl TraySensor for LogRobot {
        fn has_held_object(&mut self) -> bool {
            false
        }
    }

    /// Defers a claw close on its first step, then drives every step and
    /// finishes after `steps` steps
    #[derive(Debug)]
    struct Probe {
        steps: u8,
        deferred: bool,
    }

    impl Probe {
        fn new(steps: u8) -> Self {
            Self {
                steps,
                deferred: false,
            }
        }
    }

    impl Maneuver<LogRobot> for Probe {
        fn step(&mut self, robot: &mut LogRobot, ctx: &mut StepContext<'_, '_, LogRobot>) -> StepStatus {
            if !self.deferred {
                ctx.schedule(ActionId::CloseClaw, 0).unwrap();
                self.deferred = true;
            }
            robot.set_powers(DrivePowers::STOP);
            self.steps = self.steps.saturating_sub(1);
            if self.steps == 0 {
                StepStatus::Done
            } else {
                StepStatus::Running
            }
        }

        fn name(&self) -> &'static str {
            "probe"
        }
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let table = ActionTable::standard();
        let clock = ManualClock::new(0);
        let mut scheduler: TickScheduler<'_, LogRobot, Probe, _> = TickScheduler::new(&clock, &table);
        let mut robot = LogRobot::default();

        assert_eq!(scheduler.tick(&mut robot), None);
        assert!(scheduler.is_idle());
        assert!(robot.log.is_empty());
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn test_deferred_action_fires_next_tick_before_step() {
        let table = ActionTable::standard();
        let clock = ManualClock::new(0);
        let mut scheduler = TickScheduler::new(&clock, &table);
        let mut robot = LogRobot::default();

        scheduler.start(Probe::new(3)).unwrap();

        // Zero offset still waits for the next drain
        scheduler.tick(&mut robot);
        assert_eq!(robot.log, ["drive"]);
        assert_eq!(scheduler.pending().len(), 1);

        clock.advance(10);
        scheduler.tick(&mut robot);
        assert_eq!(robot.log, ["drive", "close", "drive"]);
    }

    #[test]
    fn test_finish_detaches_and_reports() {
        let table = ActionTable::standard();
        let clock = ManualClock::new(100);
        let mut scheduler = TickScheduler::new(&clock, &table);
        let mut robot = LogRobot::default();

        scheduler.start(Probe::new(2)).unwrap();
        assert_eq!(scheduler.tick(&mut robot), None);

        clock.advance(20);
        assert_eq!(
            scheduler.tick(&mut robot),
            Some(SchedulerEvent::ManeuverFinished {
                name: "probe",
                at_ms: 120
            })
        );
        assert!(scheduler.is_idle());

        // Detached: further ticks leave the robot alone
        let commands = robot.log.len();
        clock.advance(20);
        assert_eq!(scheduler.tick(&mut robot), None);
        assert_eq!(robot.log.len(), commands);
    }

    #[test]
    fn test_start_while_busy_is_rejected() {
        let table = ActionTable::standard();
        let clock = ManualClock::new(0);
        let mut scheduler = TickScheduler::new(&clock, &table);
        let mut robot = LogRobot::default();

        scheduler.start(Probe::new(5)).unwrap();
        scheduler.tick(&mut robot);

        let rejected = scheduler.start(Probe::new(1)).unwrap_err().into_inner();
        assert_eq!(rejected.steps, 1);
        assert_eq!(scheduler.active().map(|probe| probe.steps), Some(4));
    }

    #[test]
    fn test_abort_clears_pending() {
        let table = ActionTable::standard();
        let clock = ManualClock::new(0);
        let mut scheduler = TickScheduler::new(&clock, &table);
        let mut robot = LogRobot::default();

        scheduler.start(Probe::new(5)).unwrap();
        scheduler.tick(&mut robot);
        assert_eq!(scheduler.pending().len(), 1);

        assert!(scheduler.abort().is_some());
        assert!(scheduler.pending().is_empty());

        clock.advance(1_000);
        scheduler.tick(&mut robot);
        assert!(!robot.log.contains(&"close"));
    }
}
