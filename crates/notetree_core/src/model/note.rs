//! Note domain model.
//!
//! # Responsibility
//! - Define the leaf content item owned by exactly one notebook.
//!
//! # Invariants
//! - `notebook_id` always names the single owning notebook.
//! - `content` is raw markdown source.

use crate::model::generate_id;
use crate::model::notebook::NotebookId;
use serde::{Deserialize, Serialize};

/// Stable note identifier.
pub type NoteId = String;

/// Title given to notes created from the sidebar.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";
/// Body given to notes created from the sidebar.
pub const DEFAULT_NOTE_CONTENT: &str = "# Untitled Note\n\nStart writing...";

/// Markdown note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub notebook_id: NotebookId,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

impl Note {
    /// Creates a note with a generated id.
    pub fn new(
        notebook_id: impl Into<NotebookId>,
        title: impl Into<String>,
        content: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self::with_id(generate_id(), notebook_id, title, content, now_ms)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by seed data and storage read paths where identity already exists.
    pub fn with_id(
        id: impl Into<NoteId>,
        notebook_id: impl Into<NotebookId>,
        title: impl Into<String>,
        content: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            notebook_id: notebook_id.into(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Creates the placeholder note used by "New Note".
    pub fn untitled(notebook_id: impl Into<NotebookId>, now_ms: i64) -> Self {
        Self::new(notebook_id, DEFAULT_NOTE_TITLE, DEFAULT_NOTE_CONTENT, now_ms)
    }
}
