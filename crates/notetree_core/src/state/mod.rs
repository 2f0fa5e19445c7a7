//! Application state for the notebook browser.
//!
//! # Responsibility
//! - Hold every piece of UI-facing state in one struct.
//! - Route all changes through [`reducer::reduce`] so transitions stay
//!   deterministic and testable without a UI.
//!
//! # Invariants
//! - At most one move is in flight at a time.
//! - While any move/delete is in flight no drag gesture starts or lands.

pub mod drag;
pub mod reducer;
pub mod rows;
pub mod selection;

use crate::model::note::{Note, NoteId};
use crate::model::notebook::NotebookId;
use crate::model::tree::NotebookTree;
use drag::DragSession;
use selection::{ExpansionSet, Selection};

/// Cooperative in-flight flags guarding overlapping user gestures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlight {
    /// One global move flag.
    pub moving: bool,
    pub deleting_notebook: Option<NotebookId>,
    pub deleting_note: Option<NoteId>,
    pub creating_note: bool,
    pub creating_notebook: bool,
}

impl InFlight {
    /// Returns whether drag gestures must be suppressed.
    pub fn blocks_gestures(&self) -> bool {
        self.moving || self.deleting_notebook.is_some() || self.deleting_note.is_some()
    }

    pub fn is_deleting_notebook(&self, notebook_id: &str) -> bool {
        self.deleting_notebook.as_deref() == Some(notebook_id)
    }

    pub fn is_deleting_note(&self, note_id: &str) -> bool {
        self.deleting_note.as_deref() == Some(note_id)
    }
}

/// Whole browser state owned by one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tree: NotebookTree,
    pub selection: Selection,
    pub expanded: ExpansionSet,
    pub drag: DragSession,
    pub in_flight: InFlight,
}

impl AppState {
    pub fn new(tree: NotebookTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    /// Note shown in the editor pane.
    pub fn current_note(&self) -> Option<&Note> {
        self.selection
            .note_id
            .as_deref()
            .and_then(|note_id| self.tree.note(note_id))
    }
}
