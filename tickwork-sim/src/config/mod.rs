//! Simulator configuration
//!
//! A config file holds the maneuver tunables under `[tuning]` and, optionally,
//! the scenario to run under `[scenario]`. Missing tables and keys fall back
//! to defaults. Files ending in `.bin` hold the same structure encoded with
//! postcard.

pub mod loader;

use serde::{Deserialize, Serialize};

use tickwork_core::config::ManeuverTuning;

use crate::scenario::ScenarioConfig;

pub use loader::{decode_binary, encode_binary, load, parse_toml, ConfigError};

/// Current binary config layout
pub const CONFIG_VERSION: u8 = 1;

/// Everything a simulator run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Layout version, checked when decoding binary configs
    pub version: u8,
    pub tuning: ManeuverTuning,
    pub scenario: ScenarioConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tuning: ManeuverTuning::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject tunables or scenario parameters that cannot be simulated
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate().map_err(ConfigError::Tuning)?;
        self.scenario.validate()?;
        Ok(())
    }
}
