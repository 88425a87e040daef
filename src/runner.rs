// src/runner.rs
use std::time::{Duration, Instant};

use crate::client::NoteClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::{CreatePayload, TaskStatus, parse_timestamp};
use crate::probe::wait_for_server;
use crate::verifier::{ScenarioReport, test_crud_flow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub probe_attempts: u32,
    pub scenarios: Vec<ScenarioReport>,
    pub elapsed: Duration,
}

/// The fixed memo, task and event scenarios, in the order they run.
pub fn default_scenarios() -> Vec<CreatePayload> {
    let at = |value: &str| parse_timestamp(value).ok();

    vec![
        CreatePayload::memo("memo content"),
        CreatePayload::task("task content", Some(TaskStatus::Todo), at("2025-04-05T12:00:00")),
        CreatePayload::event("event content", at("2025-04-06T09:00:00"), at("2025-04-06T18:00:00")),
    ]
}

/// Waits for the server, then runs every default scenario in sequence.
pub fn run(config: &Config) -> Result<RunReport> {
    run_scenarios(config, &default_scenarios())
}

/// Waits for the server, then runs `scenarios` in order, stopping at the first failure.
pub fn run_scenarios(config: &Config, scenarios: &[CreatePayload]) -> Result<RunReport> {
    let started = Instant::now();
    let client = NoteClient::new(config)?;

    tracing::info!("⏳ Waiting for server at {} to be ready...", client.base_url());
    let probe_attempts = wait_for_server(&client, config.startup_timeout, config.poll_interval)?;

    let mut reports = Vec::with_capacity(scenarios.len());
    for payload in scenarios {
        reports.push(test_crud_flow(&client, payload)?);
    }

    tracing::info!("✅ All tests passed!");
    Ok(RunReport { probe_attempts, scenarios: reports, elapsed: started.elapsed() })
}
