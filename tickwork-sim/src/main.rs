//! tickwork-sim: run maneuvers against a simulated robot

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tickwork_sim::config::{self, SimConfig};
use tickwork_sim::{logging, run_scenario, ScenarioReport};

#[derive(Parser)]
#[command(
    name = "tickwork-sim",
    version,
    about = "Simulate tick-driven robot maneuvers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one turn-and-drop against the simulated robot.
    Run {
        /// TOML or binary (.bin) config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Heading to turn to (radians).
        #[arg(long, allow_negative_numbers = true)]
        target_heading: Option<f64>,
        /// Arrival tolerance (radians).
        #[arg(long)]
        allowed_error: Option<f64>,
        /// Number of release checks that still find the block.
        #[arg(long)]
        fail_checks: Option<u32>,
        /// Control-loop period (ms).
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Give up after this much simulated time (ms).
        #[arg(long)]
        max_ms: Option<u64>,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective maneuver tuning as TOML.
    Tuning {
        /// TOML or binary (.bin) config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Encode a TOML config into the binary format.
    Pack {
        /// TOML config to read.
        input: PathBuf,
        /// Binary file to write.
        output: PathBuf,
    },
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            config,
            target_heading,
            allowed_error,
            fail_checks,
            tick_ms,
            max_ms,
            json,
        } => {
            let mut config = load_or_default(config.as_deref())?;
            let scenario = &mut config.scenario;
            if let Some(value) = target_heading {
                scenario.target_heading = value;
            }
            if let Some(value) = allowed_error {
                scenario.allowed_error = value;
            }
            if let Some(value) = fail_checks {
                scenario.failed_checks = value;
            }
            if let Some(value) = tick_ms {
                scenario.tick_ms = value;
            }
            if let Some(value) = max_ms {
                scenario.max_ms = value;
            }
            config.validate()?;

            let report = run_scenario(&config.scenario, config.tuning)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
        }
        Command::Tuning { config } => {
            let config = load_or_default(config.as_deref())?;
            let tuning = toml::to_string(&config.tuning).context("failed to format tuning")?;
            print!("[tuning]\n{}", tuning);
        }
        Command::Pack { input, output } => {
            let config = config::load(&input)?;
            let bytes = config::encode_binary(&config)?;
            fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("wrote {} bytes to {}", bytes.len(), output.display());
        }
    }
    Ok(())
}

fn load_or_default(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => Ok(config::load(path)?),
        None => Ok(SimConfig::default()),
    }
}

fn print_summary(report: &ScenarioReport) {
    println!("turn_and_drop finished at {} ms", report.finished_at_ms);
    println!("  arrived:  {} ms", report.arrived_at_ms);
    println!("  released: {} ms", report.released_at_ms);
    println!("  retries:  {}", report.retries);
    println!("  ticks:    {}", report.ticks);
    println!("  heading:  {:.4} rad", report.final_heading);
    println!("  commands: {}", report.commands.len());
}
