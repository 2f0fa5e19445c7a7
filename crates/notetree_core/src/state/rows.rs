//! Flattened sidebar rows.
//!
//! Expanded notebooks list their notes first, then child notebooks, each
//! group in tree order.

use crate::model::note::Note;
use crate::model::notebook::Notebook;
use crate::state::AppState;
use std::collections::HashSet;

/// Row kind in the sidebar listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRowKind {
    Notebook,
    Note,
}

/// One visible sidebar line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub kind: TreeRowKind,
    pub id: String,
    pub label: String,
    /// Indentation level, 0 for root notebooks.
    pub depth: usize,
    pub selected: bool,
    /// Always `false` for notes.
    pub expanded: bool,
    /// Whether the row shows an expander. Always `false` for notes.
    pub has_children: bool,
    /// Row is disabled by an in-flight move or its own delete.
    pub disabled: bool,
}

enum Pending<'a> {
    Notebook(&'a Notebook, usize),
    Note(&'a Note, usize),
}

/// Flattens the expanded part of the tree into display order.
pub fn visible_rows(state: &AppState) -> Vec<TreeRow> {
    let tree = &state.tree;
    let mut rows = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = tree
        .children_of(None)
        .into_iter()
        .rev()
        .map(|notebook| Pending::Notebook(notebook, 0))
        .collect::<Vec<_>>();

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Note(note, depth) => rows.push(TreeRow {
                kind: TreeRowKind::Note,
                id: note.id.clone(),
                label: note.title.clone(),
                depth,
                selected: state.selection.is_note_selected(&note.id),
                expanded: false,
                has_children: false,
                disabled: state.in_flight.moving || state.in_flight.is_deleting_note(&note.id),
            }),
            Pending::Notebook(notebook, depth) => {
                if !visited.insert(notebook.id.as_str()) {
                    continue;
                }
                let expanded = state.expanded.is_expanded(&notebook.id);
                rows.push(TreeRow {
                    kind: TreeRowKind::Notebook,
                    id: notebook.id.clone(),
                    label: notebook.name.clone(),
                    depth,
                    selected: state.selection.is_notebook_selected(&notebook.id),
                    expanded,
                    has_children: tree.has_children(&notebook.id),
                    disabled: state.in_flight.moving
                        || state.in_flight.is_deleting_notebook(&notebook.id),
                });
                if !expanded {
                    continue;
                }
                for child in tree.children_of(Some(&notebook.id)).into_iter().rev() {
                    stack.push(Pending::Notebook(child, depth + 1));
                }
                for note in tree.notes_of(&notebook.id).into_iter().rev() {
                    stack.push(Pending::Note(note, depth + 1));
                }
            }
        }
    }
    rows
}
