//! Diagnostic logging for the simulator
//!
//! Reads `RUST_LOG`, defaulting to `info`. Output goes to stderr in compact
//! format so stdout stays clean for reports.
//!
//! ```bash
//! RUST_LOG=tickwork_core=trace tickwork-sim run --fail-checks 2
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
