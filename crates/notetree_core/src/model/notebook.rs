//! Notebook domain model.
//!
//! # Responsibility
//! - Define the named container node of the parent-pointer forest.
//!
//! # Invariants
//! - `parent_id == None` marks a root notebook.
//! - No notebook is its own ancestor.

use serde::{Deserialize, Serialize};

/// Stable notebook identifier. Issued by the notebook API.
pub type NotebookId = String;

/// Default name for notebooks created from the sidebar.
pub const DEFAULT_NOTEBOOK_NAME: &str = "New Notebook";

/// Named container that may hold notes and child notebooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    /// Parent notebook. `None` means root-level notebook.
    pub parent_id: Option<NotebookId>,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

impl Notebook {
    /// Creates a notebook with both timestamps set to `now_ms`.
    pub fn new(
        id: impl Into<NotebookId>,
        name: impl Into<String>,
        parent_id: Option<NotebookId>,
        now_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Returns whether this notebook sits at the top of the forest.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
