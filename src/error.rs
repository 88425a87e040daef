// src/error.rs
use std::fmt;

use http::StatusCode;
use thiserror::Error;

use crate::models::ResourceKind;

pub type Result<T> = std::result::Result<T, CheckError>;

/// One step of the create/read/update/delete sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Create,
    Read,
    Update,
    ReadAgain,
    Delete,
    ConfirmDeletion,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Create => "create",
            Step::Read => "read",
            Step::Update => "update",
            Step::ReadAgain => "read again",
            Step::Delete => "delete",
            Step::ConfirmDeletion => "confirm deletion",
        };
        f.write_str(label)
    }
}

/// What a single readiness poll saw.
#[derive(Debug)]
pub enum Probe {
    NotReady(StatusCode),
    Unreachable(reqwest::Error),
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::NotReady(status) => write!(f, "server answered {status}"),
            Probe::Unreachable(err) => write!(f, "server unreachable: {err}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("server at {url} did not start in time after {attempts} attempt(s){}", last_seen(.last))]
    StartupTimeout {
        url: String,
        attempts: u32,
        last: Option<Probe>,
    },

    #[error("{kind} {step}: expected {expected}, got {actual}")]
    Assertion {
        kind: ResourceKind,
        step: Step,
        expected: String,
        actual: String,
    },

    #[error("{step}: response body is not a note record: {source}")]
    Decode {
        step: Step,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

fn last_seen(last: &Option<Probe>) -> String {
    match last {
        Some(probe) => format!(" (last: {probe})"),
        None => String::new(),
    }
}

impl CheckError {
    pub(crate) fn assertion(
        kind: ResourceKind,
        step: Step,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        CheckError::Assertion {
            kind,
            step,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// The step a failed assertion belongs to, if any.
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            CheckError::Assertion { step, .. } | CheckError::Decode { step, .. } => Some(*step),
            _ => None,
        }
    }
}
