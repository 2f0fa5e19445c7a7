//! Core of the notetree notebook browser.
//! This crate owns the tree, gesture and editor rules; UI layers only render
//! what it returns.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;
pub mod state;

pub use api::{ApiError, ApiResult, HttpNotebookApi, MemoryNotebookApi, NotebookApi};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use model::notebook::{Notebook, NotebookId};
pub use model::tree::NotebookTree;
pub use repo::note_repo::{MemoryNoteRepository, NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use search::filter::{result_snippet, search_notes};
pub use service::chat_service::ChatPanel;
pub use service::editor::{format_updated_at, EditorState, NoteDraft};
pub use service::workspace_service::{WorkspaceError, WorkspaceResult, WorkspaceService};
pub use state::drag::{DragItem, DropTarget, MoveRejection, MoveRequest};
pub use state::rows::{TreeRow, TreeRowKind};
pub use state::AppState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
