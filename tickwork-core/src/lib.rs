//! Board-agnostic maneuver engine for tick-driven robot control loops
//!
//! This crate contains the logic that sequences multi-step maneuvers without
//! ever blocking the control loop:
//!
//! - Robot boundary traits (drive, mechanisms, sensors, clock)
//! - Action cache for deferred one-shot actions
//! - Subroutine contract and the named action table
//! - Tick scheduler that owns the active maneuver
//! - Turn-and-drop maneuver state machine
//! - Heading math and drive power types
//! - Tunable configuration

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod actions;
pub mod config;
pub mod maneuver;
pub mod math;
pub mod scheduler;
pub mod traits;
