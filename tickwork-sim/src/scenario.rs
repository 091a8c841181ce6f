//! Scenario runner
//!
//! Drives one turn-and-drop maneuver through a [`TickScheduler`] against a
//! [`SimRobot`] until it finishes or the time limit is reached.

use core::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tickwork_core::actions::ActionTable;
use tickwork_core::config::{ManeuverTuning, TuningError};
use tickwork_core::maneuver::TurnAndDrop;
use tickwork_core::scheduler::{SchedulerEvent, TickScheduler};
use tickwork_core::traits::{Clock, Drivetrain, ManualClock, Millis};

use crate::robot::{SimRobot, TimedCommand};

/// Scenario parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Initial heading (radians)
    pub start_heading: f64,
    /// Heading to turn to before dropping (radians)
    pub target_heading: f64,
    /// Arrival tolerance (radians)
    pub allowed_error: f64,
    /// Heading rate at full turn power (rad/s)
    pub turn_rate_rad_per_s: f64,
    /// Number of release checks that still find the block
    pub failed_checks: u32,
    /// Control-loop period
    pub tick_ms: Millis,
    /// Simulated time after which the run is abandoned
    pub max_ms: Millis,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            start_heading: 0.0,
            target_heading: FRAC_PI_2,
            allowed_error: 0.05,
            turn_rate_rad_per_s: 3.0,
            failed_checks: 0,
            tick_ms: 20,
            max_ms: 60_000,
        }
    }
}

/// Rejected scenario parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioConfigError {
    #[error("tick period must be positive")]
    ZeroTick,
    #[error("allowed error must be positive and finite, got {0}")]
    AllowedError(f64),
    #[error("turn rate must be positive and finite, got {0}")]
    TurnRate(f64),
    #[error("{name} heading must be finite, got {value}")]
    Heading { name: &'static str, value: f64 },
}

impl ScenarioConfig {
    /// Check that the scenario can be simulated
    pub fn validate(&self) -> Result<(), ScenarioConfigError> {
        if self.tick_ms == 0 {
            return Err(ScenarioConfigError::ZeroTick);
        }
        if !(self.allowed_error.is_finite() && self.allowed_error > 0.0) {
            return Err(ScenarioConfigError::AllowedError(self.allowed_error));
        }
        if !(self.turn_rate_rad_per_s.is_finite() && self.turn_rate_rad_per_s > 0.0) {
            return Err(ScenarioConfigError::TurnRate(self.turn_rate_rad_per_s));
        }
        for (name, value) in [("start", self.start_heading), ("target", self.target_heading)] {
            if !value.is_finite() {
                return Err(ScenarioConfigError::Heading { name, value });
            }
        }
        Ok(())
    }
}

/// Phase entered at a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseChange {
    pub at_ms: Millis,
    pub phase: &'static str,
}

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// Tick at which the heading came within tolerance
    pub arrived_at_ms: Millis,
    /// Tick at which the release was confirmed
    pub released_at_ms: Millis,
    /// Tick at which the maneuver reported completion
    pub finished_at_ms: Millis,
    /// Failed release checks
    pub retries: u32,
    /// Ticks executed
    pub ticks: u32,
    /// Heading when the run ended (radians)
    pub final_heading: f64,
    /// Phase transitions in order, starting with the initial phase
    pub phases: Vec<PhaseChange>,
    /// Every actuator command in the order issued
    pub commands: Vec<TimedCommand>,
}

/// Run failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ScenarioConfigError),
    #[error("invalid tuning: {0}")]
    Tuning(TuningError),
    #[error("scheduler rejected the maneuver: {0}")]
    Rejected(String),
    #[error("maneuver still {phase} after {elapsed_ms} ms")]
    Timeout {
        phase: &'static str,
        elapsed_ms: Millis,
    },
}

/// Simulate one turn-and-drop
pub fn run_scenario(
    scenario: &ScenarioConfig,
    tuning: ManeuverTuning,
) -> Result<ScenarioReport, ScenarioError> {
    scenario.validate()?;

    let clock = ManualClock::new(0);
    let table = ActionTable::standard();
    let mut scheduler = TickScheduler::new(&clock, &table);
    let mut robot = SimRobot::new(
        scenario.start_heading,
        scenario.turn_rate_rad_per_s,
        scenario.failed_checks,
    );

    let maneuver =
        TurnAndDrop::with_tuning(scenario.target_heading, scenario.allowed_error, tuning)
            .map_err(ScenarioError::Tuning)?;
    tracing::info!(
        target_heading = scenario.target_heading,
        allowed_error = scenario.allowed_error,
        failed_checks = scenario.failed_checks,
        "starting scenario"
    );
    scheduler
        .start(maneuver)
        .map_err(|err| ScenarioError::Rejected(err.to_string()))?;

    let mut phases = vec![PhaseChange {
        at_ms: 0,
        phase: "turning",
    }];
    let mut arrived_at_ms = None;
    let mut released_at_ms = None;
    let mut retries = 0;

    loop {
        let now_ms = clock.now_ms();
        robot.update(now_ms);

        if let Some(SchedulerEvent::ManeuverFinished { name, at_ms }) = scheduler.tick(&mut robot) {
            tracing::info!(name, at_ms, retries, "scenario finished");
            phases.push(PhaseChange {
                at_ms,
                phase: "done",
            });
            return Ok(ScenarioReport {
                arrived_at_ms: arrived_at_ms.unwrap_or(at_ms),
                released_at_ms: released_at_ms.unwrap_or(at_ms),
                finished_at_ms: at_ms,
                retries,
                ticks: scheduler.ticks(),
                final_heading: robot.pose().heading,
                phases,
                commands: robot.into_log(),
            });
        }

        let Some(maneuver) = scheduler.active() else {
            break;
        };
        retries = maneuver.retries();

        let phase = maneuver.phase().name();
        if phases.last().map(|p| p.phase) != Some(phase) {
            tracing::debug!(at_ms = now_ms, phase, "phase change");
            match phase {
                "checking" => arrived_at_ms = Some(now_ms),
                "waiting" => released_at_ms = Some(now_ms),
                _ => {}
            }
            phases.push(PhaseChange {
                at_ms: now_ms,
                phase,
            });
        }

        if now_ms >= scenario.max_ms {
            return Err(ScenarioError::Timeout {
                phase,
                elapsed_ms: now_ms,
            });
        }
        clock.advance(scenario.tick_ms);
    }

    Err(ScenarioError::Timeout {
        phase: "idle",
        elapsed_ms: clock.now_ms(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_is_valid() {
        assert_eq!(ScenarioConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let zero_tick = ScenarioConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_tick.validate(), Err(ScenarioConfigError::ZeroTick));

        let no_tolerance = ScenarioConfig {
            allowed_error: 0.0,
            ..Default::default()
        };
        assert_eq!(
            no_tolerance.validate(),
            Err(ScenarioConfigError::AllowedError(0.0))
        );

        let frozen = ScenarioConfig {
            turn_rate_rad_per_s: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            frozen.validate(),
            Err(ScenarioConfigError::TurnRate(_))
        ));

        let lost = ScenarioConfig {
            target_heading: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            lost.validate(),
            Err(ScenarioConfigError::Heading { name: "target", .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = ManeuverTuning {
            reduction_dist: -1.0,
            ..Default::default()
        };
        assert_eq!(
            run_scenario(&ScenarioConfig::default(), tuning).unwrap_err(),
            ScenarioError::Tuning(TuningError::NonPositiveReductionDistance)
        );
    }

    #[test]
    fn test_times_out_when_never_arriving() {
        // Tolerance can never be met from the far side of a wrap
        let scenario = ScenarioConfig {
            target_heading: 10.0,
            max_ms: 2_000,
            ..Default::default()
        };
        let err = run_scenario(&scenario, ManeuverTuning::default()).unwrap_err();
        assert_eq!(
            err,
            ScenarioError::Timeout {
                phase: "turning",
                elapsed_ms: 2_000
            }
        );
    }
}
