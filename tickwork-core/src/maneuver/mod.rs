//! Maneuvers
//!
//! Multi-phase physical actions implemented as explicit state machines over
//! the [`Maneuver`](crate::scheduler::Maneuver) contract.

pub mod turn_and_drop;

pub use turn_and_drop::{Phase, RetryStep, TurnAndDrop, RETRY_SEQUENCE};
