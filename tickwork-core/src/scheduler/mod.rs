//! Tick scheduler
//!
//! Drains deferred one-shot actions and steps the active maneuver once per
//! control-loop tick, without ever blocking the loop.

pub mod cache;
pub mod executor;
pub mod subroutine;

pub use cache::{ActionCache, ActionCacheError, PendingAction, ACTION_CACHE_CAPACITY};
pub use executor::{SchedulerError, SchedulerEvent, TickScheduler};
pub use subroutine::{Maneuver, OneShot, StepContext, StepStatus, Subroutine};
