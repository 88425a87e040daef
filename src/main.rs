use std::process::ExitCode;

use banchoo_api_check::{Config, run};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_RUST_LOG: &str = "banchoo_api_check=info";

fn main() -> ExitCode {
    setup_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(report) => {
            tracing::debug!(
                probe_attempts = report.probe_attempts,
                scenarios = report.scenarios.len(),
                elapsed_ms = report.elapsed.as_millis() as u64,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_RUST_LOG));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
