use std::fs;

use tempfile::TempDir;
use tickwork_core::config::TuningError;
use tickwork_sim::config::{self, ConfigError, SimConfig};

#[test]
fn loads_toml_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sim.toml");
    fs::write(
        &path,
        "[tuning]\ntime_until_drive_away_ms = 250\n\n[scenario]\nfailed_checks = 1\n",
    )
    .unwrap();

    let config = config::load(&path).unwrap();
    assert_eq!(config.tuning.time_until_drive_away_ms, 250);
    assert_eq!(config.tuning.time_until_first_check_ms, 1500);
    assert_eq!(config.scenario.failed_checks, 1);
}

#[test]
fn loads_binary_written_from_toml() {
    let dir = TempDir::new().unwrap();
    let toml_path = dir.path().join("sim.toml");
    let bin_path = dir.path().join("sim.bin");
    fs::write(&toml_path, "[scenario]\ntarget_heading = -1.0\n").unwrap();

    let from_toml = config::load(&toml_path).unwrap();
    fs::write(&bin_path, config::encode_binary(&from_toml).unwrap()).unwrap();

    assert_eq!(config::load(&bin_path).unwrap(), from_toml);
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn rejects_invalid_tuning_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sim.toml");
    fs::write(&path, "[tuning]\nreduction_dist = -0.5\n").unwrap();

    assert!(matches!(
        config::load(&path),
        Err(ConfigError::Tuning(TuningError::NonPositiveReductionDistance))
    ));
}

#[test]
fn rejects_corrupt_binary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sim.bin");
    fs::write(&path, [SimConfig::default().version, 0xff]).unwrap();

    assert!(matches!(config::load(&path), Err(ConfigError::Binary(_))));
}
