//! Config file loading
//!
//! TOML is the editable format. The binary format is the postcard encoding
//! of [`SimConfig`], as produced by `tickwork-sim pack`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tickwork_core::config::TuningError;

use super::{SimConfig, CONFIG_VERSION};
use crate::scenario::ScenarioConfigError;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config")]
    Toml(#[from] toml::de::Error),
    #[error("invalid binary config")]
    Binary(#[from] postcard::Error),
    #[error("config version mismatch: found {found}, expected {}", CONFIG_VERSION)]
    VersionMismatch { found: u8 },
    #[error("invalid tuning: {0}")]
    Tuning(TuningError),
    #[error("invalid scenario")]
    Scenario(#[from] ScenarioConfigError),
}

/// Load and validate a config file
///
/// The format is chosen by extension: `.bin` is binary, anything else TOML.
pub fn load(path: &Path) -> Result<SimConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");

    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let config = if path.extension().is_some_and(|ext| ext == "bin") {
        decode_binary(&fs::read(path).map_err(io_err)?)?
    } else {
        parse_toml(&fs::read_to_string(path).map_err(io_err)?)?
    };

    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Parse a TOML config
pub fn parse_toml(source: &str) -> Result<SimConfig, ConfigError> {
    Ok(toml::from_str(source)?)
}

/// Decode a binary config, rejecting other layout versions
pub fn decode_binary(bytes: &[u8]) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = postcard::from_bytes(bytes)?;
    if config.version != CONFIG_VERSION {
        tracing::warn!(
            found = config.version,
            expected = CONFIG_VERSION,
            "config version mismatch"
        );
        return Err(ConfigError::VersionMismatch {
            found: config.version,
        });
    }
    Ok(config)
}

/// Encode a config in the binary format
pub fn encode_binary(config: &SimConfig) -> Result<Vec<u8>, ConfigError> {
    Ok(postcard::to_allocvec(config)?)
}

fn log_config_summary(config: &SimConfig) {
    tracing::info!("configuration loaded");
    tracing::debug!(
        reduction_dist = config.tuning.reduction_dist,
        first_check_ms = config.tuning.time_until_first_check_ms,
        subsequent_checks_ms = config.tuning.time_until_subsequent_checks_ms,
        drive_away_ms = config.tuning.time_until_drive_away_ms,
        "tuning"
    );
    tracing::debug!(
        target_heading = config.scenario.target_heading,
        failed_checks = config.scenario.failed_checks,
        tick_ms = config.scenario.tick_ms,
        "scenario"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(parse_toml("").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = parse_toml(
            r#"
            [tuning]
            time_until_first_check_ms = 900

            [scenario]
            target_heading = 3.0
            failed_checks = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.tuning.time_until_first_check_ms, 900);
        assert_eq!(config.tuning.time_until_subsequent_checks_ms, 2000);
        assert_eq!(config.tuning.reduction_dist, PI / 3.0);
        assert_eq!(config.scenario.target_heading, 3.0);
        assert_eq!(config.scenario.failed_checks, 2);
        assert_eq!(config.scenario.tick_ms, 20);
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        let err = parse_toml("[tuning]\nreduction_dist = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_binary_round_trip_preserves_config() {
        let mut config = SimConfig::default();
        config.tuning.time_until_drive_away_ms = 750;
        config.scenario.failed_checks = 3;

        let bytes = encode_binary(&config).unwrap();
        assert_eq!(decode_binary(&bytes).unwrap(), config);
    }

    #[test]
    fn test_binary_version_mismatch() {
        let config = SimConfig {
            version: CONFIG_VERSION + 1,
            ..Default::default()
        };
        let bytes = encode_binary(&config).unwrap();
        assert!(matches!(
            decode_binary(&bytes),
            Err(ConfigError::VersionMismatch { found }) if found == CONFIG_VERSION + 1
        ));
    }

    #[test]
    fn test_validate_rejects_bad_tuning() {
        let mut config = SimConfig::default();
        config.tuning.reduction_dist = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Tuning(TuningError::NonPositiveReductionDistance))
        ));
    }
}
