//! Blocking HTTP implementation of [`NotebookApi`].
//!
//! # Invariants
//! - Requests are issued once; there is no retry or backoff.
//! - Every call logs one metadata-only `api_call` event.

use crate::api::dto::{BaseResponse, CreateNotebookRequest, CreateNotebookResponse, NotebookDto};
use crate::api::{ApiError, ApiResult, NotebookApi};
use crate::model::notebook::{Notebook, NotebookId};
use log::{info, warn};
use reqwest::blocking::{Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::{Duration, Instant};

const NOTEBOOK_PATH: &str = "/api/notebook/v1";

/// `reqwest`-backed notebook API client.
#[derive(Debug, Clone)]
pub struct HttpNotebookApi {
    client: Client,
    base_url: String,
}

impl HttpNotebookApi {
    /// Builds a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{NOTEBOOK_PATH}", self.base_url)
    }

    fn item_url(&self, notebook_id: &str) -> String {
        format!("{}{NOTEBOOK_PATH}/{notebook_id}", self.base_url)
    }
}

impl NotebookApi for HttpNotebookApi {
    fn list_notebooks(&self) -> ApiResult<Vec<Notebook>> {
        let started_at = Instant::now();
        let url = self.collection_url();
        let result = self
            .client
            .get(&url)
            .send()
            .map_err(ApiError::from)
            .and_then(|response| read_body(response, &url))
            .and_then(|body| decode::<Vec<NotebookDto>>(&body))
            .and_then(BaseResponse::into_data)
            .and_then(|rows| rows.into_iter().map(NotebookDto::into_notebook).collect());
        log_call("list_notebooks", started_at, &result);
        result
    }

    fn create_notebook(&self, name: &str, parent_id: Option<&str>) -> ApiResult<NotebookId> {
        let started_at = Instant::now();
        let url = self.collection_url();
        let request = CreateNotebookRequest {
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
        };
        let result = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(ApiError::from)
            .and_then(|response| read_body(response, &url))
            .and_then(|body| decode::<CreateNotebookResponse>(&body))
            .and_then(BaseResponse::into_data)
            .map(|created| created.id);
        log_call("create_notebook", started_at, &result);
        result
    }

    fn delete_notebook(&self, notebook_id: &str) -> ApiResult<()> {
        let started_at = Instant::now();
        let url = self.item_url(notebook_id);
        let result = self
            .client
            .delete(&url)
            .send()
            .map_err(ApiError::from)
            .and_then(|response| read_body(response, &url))
            .and_then(|body| delete_outcome(&body));
        log_call("delete_notebook", started_at, &result);
        result
    }
}

/// Reads the whole body, mapping non-2xx statuses to [`ApiError::Status`].
fn read_body(response: Response, url: &str) -> ApiResult<String> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(status_error(status.as_u16(), url, &body));
    }
    Ok(body)
}

fn status_error(status: u16, url: &str, body: &str) -> ApiError {
    ApiError::Status {
        status,
        url: url.to_string(),
        message: envelope_message(body),
    }
}

/// Envelope `message` of an error body, if the body is an envelope.
fn envelope_message(body: &str) -> Option<String> {
    serde_json::from_str::<BaseResponse<IgnoredAny>>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.trim().is_empty())
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<BaseResponse<T>> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// A 2xx delete succeeds with an empty body or a `success=true` envelope.
fn delete_outcome(body: &str) -> ApiResult<()> {
    if body.trim().is_empty() {
        return Ok(());
    }
    decode::<IgnoredAny>(body)?.ensure_success()
}

fn log_call<T>(operation: &str, started_at: Instant, result: &ApiResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event=api_call module=api status=ok op={operation} duration_ms={duration_ms}"
        ),
        Err(err) => warn!(
            "event=api_call module=api status=error op={operation} duration_ms={duration_ms} error={err}"
        ),
    }
}

/// Strips trailing slashes so paths can be appended verbatim.
pub fn normalize_base_url(value: String) -> String {
    value.trim().trim_end_matches('/').to_string()
}
