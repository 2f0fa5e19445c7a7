//! Notebook REST API client.
//!
//! # Responsibility
//! - Define the notebook API contract consumed by the workspace service.
//! - Decode the `{success, message, code, data}` envelope into domain models.
//!
//! # Invariants
//! - Envelopes with `success=false` surface as [`ApiError::Rejected`].
//! - A missing `updated_at` falls back to `created_at`.
//!
//! # See also
//! - `dto` for wire shapes.

pub mod dto;
pub mod http;
pub mod memory;

use crate::model::notebook::{Notebook, NotebookId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use http::HttpNotebookApi;
pub use memory::MemoryNotebookApi;

/// Result type for notebook API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from notebook API calls.
#[derive(Debug)]
pub enum ApiError {
    /// Connection, timeout or body read failure.
    Transport(reqwest::Error),
    /// Non-2xx HTTP status, with the envelope message when the body had one.
    Status {
        status: u16,
        url: String,
        message: Option<String>,
    },
    /// Server answered with `success=false`.
    Rejected { code: i64, message: String },
    /// Body is not the expected JSON envelope.
    Decode(String),
    /// Timestamp string in a notebook row cannot be parsed.
    InvalidTimestamp(String),
    /// In-memory API: notebook id unknown.
    NotFound(NotebookId),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "notebook api transport error: {err}"),
            Self::Status {
                status,
                url,
                message,
            } => {
                write!(f, "notebook api returned status {status} for {url}")?;
                match message {
                    Some(message) => write!(f, ": {message}"),
                    None => Ok(()),
                }
            }
            Self::Rejected { code, message } => {
                write!(f, "notebook api rejected request (code {code}): {message}")
            }
            Self::Decode(message) => write!(f, "invalid notebook api response: {message}"),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp `{value}`"),
            Self::NotFound(id) => write!(f, "notebook not found: {id}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        Self::Transport(value)
    }
}

/// Notebook endpoints consumed by the browser.
pub trait NotebookApi {
    /// `GET /api/notebook/v1`.
    fn list_notebooks(&self) -> ApiResult<Vec<Notebook>>;
    /// `POST /api/notebook/v1`; returns the created id.
    fn create_notebook(&self, name: &str, parent_id: Option<&str>) -> ApiResult<NotebookId>;
    /// `DELETE /api/notebook/v1/{id}`.
    fn delete_notebook(&self, notebook_id: &str) -> ApiResult<()>;
}
