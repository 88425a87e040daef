// src/verifier.rs
use std::time::{Duration, Instant};

use http::StatusCode;
use reqwest::blocking::Response;

use crate::client::{NoteClient, read_record};
use crate::error::{CheckError, Result, Step};
use crate::models::{CreatePayload, ResourceKind, UpdatePayload};

/// Outcome of one passed create/read/update/delete scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub kind: ResourceKind,
    pub note_id: i64,
    pub elapsed: Duration,
}

/// Runs the full lifecycle for one record created from `payload`.
///
/// The record is created on the kind's own endpoint and then read, updated
/// and deleted through `/notes/{id}`. The first unmet expectation stops the
/// scenario.
pub fn test_crud_flow(client: &NoteClient, payload: &CreatePayload) -> Result<ScenarioReport> {
    let kind = payload.kind();
    let started = Instant::now();

    tracing::info!("🚨 Testing {} flow", kind.name().to_uppercase());

    // 1. 创建
    tracing::info!("✅ Create");
    let response = client.create(payload)?;
    expect_status(kind, Step::Create, &response, StatusCode::OK)?;
    let created = read_record(response, Step::Create)?;
    expect_eq(kind, Step::Create, payload.content(), &created.content)?;
    let note_id = created.id;
    tracing::debug!(%kind, note_id, "created");

    // 2. 按 id 读取
    tracing::info!("✅ Read");
    let response = client.get_note(note_id)?;
    expect_status(kind, Step::Read, &response, StatusCode::OK)?;
    let record = read_record(response, Step::Read)?;
    expect_eq(kind, Step::Read, note_id, record.id)?;

    // 3. 更新, 返回体不检查
    tracing::info!("✅ Update");
    let updated = UpdatePayload { content: kind.updated_content() };
    let response = client.update_note(note_id, &updated)?;
    expect_status(kind, Step::Update, &response, StatusCode::OK)?;

    // 4. 再读一次, 内容应已更新
    tracing::info!("✅ Read Again");
    let response = client.get_note(note_id)?;
    expect_status(kind, Step::ReadAgain, &response, StatusCode::OK)?;
    let record = read_record(response, Step::ReadAgain)?;
    expect_eq(kind, Step::ReadAgain, updated.content.as_str(), &record.content)?;

    // 5. 删除
    tracing::info!("✅ Delete");
    let response = client.delete_note(note_id)?;
    expect_status(kind, Step::Delete, &response, StatusCode::OK)?;

    // 6. 删除后应查不到
    tracing::info!("✅ Confirm Deletion");
    let response = client.get_note(note_id)?;
    expect_status(kind, Step::ConfirmDeletion, &response, StatusCode::NOT_FOUND)?;

    Ok(ScenarioReport { kind, note_id, elapsed: started.elapsed() })
}

fn expect_status(kind: ResourceKind, step: Step, response: &Response, expected: StatusCode) -> Result<()> {
    let actual = response.status();
    if actual == expected {
        return Ok(());
    }
    tracing::error!(%kind, %step, %expected, %actual, "unexpected status");
    Err(CheckError::assertion(kind, step, expected, actual))
}

fn expect_eq<E, A>(kind: ResourceKind, step: Step, expected: E, actual: A) -> Result<()>
where
    E: PartialEq<A> + std::fmt::Display,
    A: std::fmt::Display,
{
    if expected == actual {
        return Ok(());
    }
    tracing::error!(%kind, %step, %expected, %actual, "unexpected field value");
    Err(CheckError::assertion(kind, step, expected, actual))
}
