//! Host simulator for tickwork maneuvers
//!
//! Wires the core scheduler to a simulated robot so maneuvers and tunables
//! can be exercised without hardware.

pub mod config;
pub mod logging;
pub mod robot;
pub mod scenario;

pub use config::SimConfig;
pub use robot::{RobotCommand, SimRobot, TimedCommand};
pub use scenario::{run_scenario, ScenarioConfig, ScenarioError, ScenarioReport};
