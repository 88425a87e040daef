// src/lib.rs
//! Smoke checks for the Banchoo note server.
//!
//! Waits for the server to answer `GET /notes`, then walks a memo, a task and
//! an event through create, read, update, delete and a final not-found read.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod runner;
pub mod verifier;

pub use client::NoteClient;
pub use config::Config;
pub use error::{CheckError, Result, Step};
pub use models::{CreatePayload, NoteRecord, ResourceKind, TaskStatus, UpdatePayload};
pub use probe::wait_for_server;
pub use runner::{RunReport, default_scenarios, run, run_scenarios};
pub use verifier::{ScenarioReport, test_crud_flow};
