// src/client.rs
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Response};

use crate::config::Config;
use crate::error::{CheckError, Result, Step};
use crate::models::{CreatePayload, NoteRecord, ResourceKind, UpdatePayload};

/// Blocking client for the note server, one method per endpoint.
///
/// Every request is built from the injected base URL. Requests carry no
/// timeout of their own; callers that need one (the readiness probe) pass it
/// explicitly.
#[derive(Debug, Clone)]
pub struct NoteClient {
    http: Client,
    base_url: Url,
}

impl NoteClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(None::<Duration>).build()?;
        Ok(NoteClient { http, base_url: config.base_url.clone() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CheckError::Config(format!("cannot build URL for `{path}`: {e}")))
    }

    pub fn notes_url(&self) -> Result<Url> {
        self.url("notes")
    }

    pub fn note_url(&self, id: i64) -> Result<Url> {
        self.url(&format!("notes/{id}"))
    }

    /// `GET /notes`, bounded by `timeout` when one is given.
    pub fn list_notes(&self, timeout: Option<Duration>) -> Result<Response> {
        let mut request = self.http.get(self.notes_url()?);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        Ok(request.send()?)
    }

    /// `POST /{kind}s`
    pub fn create(&self, payload: &CreatePayload) -> Result<Response> {
        let url = self.url(&payload.kind().collection())?;
        Ok(self.http.post(url).json(payload).send()?)
    }

    /// `GET /notes/{id}`
    pub fn get_note(&self, id: i64) -> Result<Response> {
        Ok(self.http.get(self.note_url(id)?).send()?)
    }

    /// `PUT /notes/{id}`
    pub fn update_note(&self, id: i64, payload: &UpdatePayload) -> Result<Response> {
        Ok(self.http.put(self.note_url(id)?).json(payload).send()?)
    }

    /// `DELETE /notes/{id}`
    pub fn delete_note(&self, id: i64) -> Result<Response> {
        Ok(self.http.delete(self.note_url(id)?).send()?)
    }
}

/// Reads the whole body of a `step` response and decodes it as a note record.
pub fn read_record(response: Response, step: Step) -> Result<NoteRecord> {
    let body = response.bytes()?;
    serde_json::from_slice(&body).map_err(|source| CheckError::Decode { step, source })
}
