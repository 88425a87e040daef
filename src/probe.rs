// src/probe.rs
use std::thread;
use std::time::{Duration, Instant};

use http::StatusCode;

use crate::client::NoteClient;
use crate::error::{CheckError, Probe, Result};

/// Blocks until `GET /notes` answers 200 or `timeout` runs out.
///
/// Connection failures and non-200 answers both mean "not ready yet" and are
/// retried every `interval`. Errors that waiting cannot fix (a request that
/// cannot even be built) fail straight away.
pub fn wait_for_server(client: &NoteClient, timeout: Duration, interval: Duration) -> Result<u32> {
    let url = client.notes_url()?;
    let max_attempts = max_attempts(timeout, interval);
    let deadline = Instant::now() + timeout;
    let mut last = None;
    let mut attempts = 0;

    while attempts < max_attempts {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        attempts += 1;

        match poll_once(client, remaining)? {
            None => {
                tracing::debug!(attempt = attempts, "server ready at {url}");
                return Ok(attempts);
            }
            Some(probe) => {
                tracing::debug!(attempt = attempts, "not ready yet: {probe}");
                last = Some(probe);
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        thread::sleep(interval.min(remaining));
    }

    Err(CheckError::StartupTimeout { url: url.to_string(), attempts, last })
}

/// One readiness poll. `Ok(None)` means ready.
fn poll_once(client: &NoteClient, timeout: Duration) -> Result<Option<Probe>> {
    match client.list_notes(Some(timeout)) {
        Ok(response) if response.status() == StatusCode::OK => Ok(None),
        Ok(response) => Ok(Some(Probe::NotReady(response.status()))),
        Err(CheckError::Http(err)) if is_retryable(&err) => Ok(Some(Probe::Unreachable(err))),
        Err(CheckError::Http(err)) => Err(CheckError::Config(format!(
            "readiness request can never succeed: {err}"
        ))),
        Err(err) => Err(err),
    }
}

// builder / redirect 错误等待也不会好, 其余(连接被拒, DNS, 超时...)都算暂时不可达
fn is_retryable(err: &reqwest::Error) -> bool {
    !(err.is_builder() || err.is_redirect())
}

fn max_attempts(timeout: Duration, interval: Duration) -> u32 {
    if interval.is_zero() {
        return u32::MAX;
    }
    let attempts = timeout.as_nanos().div_ceil(interval.as_nanos()).max(1);
    u32::try_from(attempts).unwrap_or(u32::MAX)
}
