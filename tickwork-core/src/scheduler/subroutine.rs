//! Subroutine contract
//!
//! A subroutine is either a one-shot action, which runs to completion the
//! moment it is invoked, or a cyclic maneuver, which does a bounded amount of
//! work per tick and reports when it has finished.

use crate::actions::{ActionId, ActionTable};
use crate::traits::Millis;

use super::cache::{ActionCache, ActionCacheError};

/// Action that fully executes in a single call
pub trait OneShot<R: ?Sized> {
    /// Issue the action's commands
    fn run_once(&self, robot: &mut R);

    /// Name for logs and diagnostics
    fn name(&self) -> &'static str;
}

/// Progress reported by a maneuver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepStatus {
    /// More ticks are needed
    Running,
    /// Finished; the maneuver must not be stepped again
    Done,
}

impl StepStatus {
    /// Check if the maneuver has finished
    pub fn is_done(self) -> bool {
        self == StepStatus::Done
    }
}

/// Stateful maneuver polled once per tick
pub trait Maneuver<R: ?Sized> {
    /// Perform one tick's worth of non-blocking work
    fn step(&mut self, robot: &mut R, ctx: &mut StepContext<'_, '_, R>) -> StepStatus;

    /// Name for logs and diagnostics
    fn name(&self) -> &'static str;
}

/// Per-tick view handed to a maneuver step
///
/// Carries the tick's timestamp, the named action table, and the action
/// cache so the step can run actions now or defer them.
pub struct StepContext<'s, 'a, R: ?Sized> {
    now_ms: Millis,
    cache: &'s mut ActionCache,
    actions: &'s ActionTable<'a, R>,
}

impl<'s, 'a, R: ?Sized> StepContext<'s, 'a, R> {
    /// Create a context for the tick at `now_ms`
    pub fn new(now_ms: Millis, cache: &'s mut ActionCache, actions: &'s ActionTable<'a, R>) -> Self {
        Self {
            now_ms,
            cache,
            actions,
        }
    }

    /// Time sampled at the start of this tick
    pub fn now_ms(&self) -> Millis {
        self.now_ms
    }

    /// The named action table
    pub fn actions(&self) -> &ActionTable<'a, R> {
        self.actions
    }

    /// Pending deferred actions
    pub fn pending(&self) -> &ActionCache {
        self.cache
    }

    /// Run an action immediately
    pub fn run(&self, id: ActionId, robot: &mut R) {
        self.actions.run(id, robot);
    }

    /// Defer an action to `offset_ms` after this tick
    ///
    /// Returns the absolute fire time. The action fires on a later tick at
    /// the earliest, even with a zero offset.
    pub fn schedule(&mut self, id: ActionId, offset_ms: i64) -> Result<Millis, ActionCacheError> {
        self.cache.enqueue(id, self.now_ms, offset_ms)
    }

    /// Discard every deferred action that has not fired yet
    ///
    /// Returns the number of actions discarded.
    pub fn clear_pending(&mut self) -> usize {
        self.cache.clear()
    }
}

/// Either variant of the subroutine contract
///
/// Lets a single plan slot hold a one-shot action or a full maneuver.
#[derive(Debug, Clone, PartialEq)]
pub enum Subroutine<M> {
    /// Run a named action and finish in the same step
    Once(ActionId),
    /// Step a maneuver until it finishes
    Cyclic(M),
}

impl<R: ?Sized, M: Maneuver<R>> Maneuver<R> for Subroutine<M> {
    fn step(&mut self, robot: &mut R, ctx: &mut StepContext<'_, '_, R>) -> StepStatus {
        match self {
            Subroutine::Once(id) => {
                ctx.run(*id, robot);
                StepStatus::Done
            }
            Subroutine::Cyclic(maneuver) => maneuver.step(robot, ctx),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Subroutine::Once(id) => id.name(),
            Subroutine::Cyclic(maneuver) => maneuver.name(),
        }
    }
}
