//! Selection and expansion state for the notebook browser.
//!
//! # Invariants
//! - Selecting a note never leaves its owning notebook unselected.
//! - Expansion is a plain id set; ids of removed notebooks are dropped by
//!   the reducer, not here.

use crate::model::note::NoteId;
use crate::model::notebook::NotebookId;
use std::collections::BTreeSet;

/// Currently active notebook and note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub notebook_id: Option<NotebookId>,
    pub note_id: Option<NoteId>,
}

impl Selection {
    pub fn select_notebook(&mut self, notebook_id: impl Into<NotebookId>) {
        self.notebook_id = Some(notebook_id.into());
    }

    /// Selects a note together with the notebook that owns it.
    pub fn select_note(&mut self, note_id: impl Into<NoteId>, notebook_id: impl Into<NotebookId>) {
        self.note_id = Some(note_id.into());
        self.notebook_id = Some(notebook_id.into());
    }

    pub fn clear(&mut self) {
        self.notebook_id = None;
        self.note_id = None;
    }

    pub fn is_empty(&self) -> bool {
        self.notebook_id.is_none() && self.note_id.is_none()
    }

    pub fn is_notebook_selected(&self, notebook_id: &str) -> bool {
        self.notebook_id.as_deref() == Some(notebook_id)
    }

    pub fn is_note_selected(&self, note_id: &str) -> bool {
        self.note_id.as_deref() == Some(note_id)
    }
}

/// Set of notebook ids whose children are currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    expanded: BTreeSet<NotebookId>,
}

impl ExpansionSet {
    pub fn is_expanded(&self, notebook_id: &str) -> bool {
        self.expanded.contains(notebook_id)
    }

    pub fn expand(&mut self, notebook_id: impl Into<NotebookId>) {
        self.expanded.insert(notebook_id.into());
    }

    pub fn collapse(&mut self, notebook_id: &str) {
        self.expanded.remove(notebook_id);
    }

    /// Flips one notebook and returns the new expanded flag.
    pub fn toggle(&mut self, notebook_id: &str) -> bool {
        if self.expanded.remove(notebook_id) {
            false
        } else {
            self.expanded.insert(notebook_id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotebookId> {
        self.expanded.iter()
    }
}
