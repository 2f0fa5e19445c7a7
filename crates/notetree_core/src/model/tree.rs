//! In-memory notebook/note tree.
//!
//! # Responsibility
//! - Own the canonical notebook and note lists.
//! - Answer ordered child/note listings and subtree membership queries.
//!
//! # Invariants
//! - Child and note listings are sorted with [`locale_compare`]; ties keep
//!   insertion order.
//! - `descendant_ids` always contains the queried id and terminates on
//!   malformed (cyclic) input.

use crate::model::note::Note;
use crate::model::notebook::{Notebook, NotebookId};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical notebook forest plus the notes hanging off it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookTree {
    notebooks: Vec<Notebook>,
    notes: Vec<Note>,
}

impl NotebookTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree from existing lists.
    pub fn from_parts(notebooks: Vec<Notebook>, notes: Vec<Note>) -> Self {
        Self { notebooks, notes }
    }

    pub fn notebooks(&self) -> &[Notebook] {
        &self.notebooks
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn notebook(&self, notebook_id: &str) -> Option<&Notebook> {
        self.notebooks.iter().find(|notebook| notebook.id == notebook_id)
    }

    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Lists direct child notebooks of `parent_id` (`None` lists roots),
    /// sorted by name.
    pub fn children_of(&self, parent_id: Option<&str>) -> Vec<&Notebook> {
        let mut children = self
            .notebooks
            .iter()
            .filter(|notebook| notebook.parent_id.as_deref() == parent_id)
            .collect::<Vec<_>>();
        children.sort_by(|left, right| locale_compare(&left.name, &right.name));
        children
    }

    /// Lists notes owned by `notebook_id`, sorted by title.
    pub fn notes_of(&self, notebook_id: &str) -> Vec<&Note> {
        let mut notes = self
            .notes
            .iter()
            .filter(|note| note.notebook_id == notebook_id)
            .collect::<Vec<_>>();
        notes.sort_by(|left, right| locale_compare(&left.title, &right.title));
        notes
    }

    /// Returns `notebook_id` plus every notebook below it.
    pub fn descendant_ids(&self, notebook_id: &str) -> HashSet<NotebookId> {
        let mut children_by_parent: HashMap<&str, Vec<&str>> = HashMap::new();
        for notebook in &self.notebooks {
            if let Some(parent_id) = notebook.parent_id.as_deref() {
                children_by_parent
                    .entry(parent_id)
                    .or_default()
                    .push(notebook.id.as_str());
            }
        }

        let mut visited = HashSet::new();
        let mut stack = vec![notebook_id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.to_string()) {
                continue;
            }
            if let Some(children) = children_by_parent.get(current) {
                stack.extend(children.iter().copied());
            }
        }
        visited
    }

    /// Returns whether the notebook shows an expander: it has child notebooks
    /// or notes.
    pub fn has_children(&self, notebook_id: &str) -> bool {
        self.notebooks
            .iter()
            .any(|notebook| notebook.parent_id.as_deref() == Some(notebook_id))
            || self.notes.iter().any(|note| note.notebook_id == notebook_id)
    }

    /// Replaces the notebook list wholesale (after an API refetch).
    pub fn replace_notebooks(&mut self, notebooks: Vec<Notebook>) {
        self.notebooks = notebooks;
    }

    /// Replaces the note list wholesale (after a store load).
    pub fn replace_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Appends one note.
    pub fn insert_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Overwrites title/content of one note. Returns `false` when missing.
    pub fn update_note(&mut self, note_id: &str, title: &str, content: &str, now_ms: i64) -> bool {
        match self.notes.iter_mut().find(|note| note.id == note_id) {
            Some(note) => {
                note.title = title.to_string();
                note.content = content.to_string();
                note.updated_at = now_ms;
                true
            }
            None => false,
        }
    }

    /// Removes one note by id.
    pub fn remove_note(&mut self, note_id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == note_id)?;
        Some(self.notes.remove(index))
    }

    /// Removes one notebook by id. Child notebooks and notes are left as-is.
    pub fn remove_notebook(&mut self, notebook_id: &str) -> Option<Notebook> {
        let index = self
            .notebooks
            .iter()
            .position(|notebook| notebook.id == notebook_id)?;
        Some(self.notebooks.remove(index))
    }

    /// Renames one notebook. Returns `false` when missing.
    pub fn rename_notebook(&mut self, notebook_id: &str, name: &str, now_ms: i64) -> bool {
        match self.notebook_mut(notebook_id) {
            Some(notebook) => {
                notebook.name = name.to_string();
                notebook.updated_at = now_ms;
                true
            }
            None => false,
        }
    }

    /// Re-parents one notebook without cycle validation.
    ///
    /// Callers go through the drag-and-drop engine, which validates first.
    pub fn set_notebook_parent(
        &mut self,
        notebook_id: &str,
        parent_id: Option<NotebookId>,
        now_ms: i64,
    ) -> bool {
        match self.notebook_mut(notebook_id) {
            Some(notebook) => {
                notebook.parent_id = parent_id;
                notebook.updated_at = now_ms;
                true
            }
            None => false,
        }
    }

    /// Moves one note to another notebook.
    pub fn set_note_notebook(&mut self, note_id: &str, notebook_id: &str, now_ms: i64) -> bool {
        match self.notes.iter_mut().find(|note| note.id == note_id) {
            Some(note) => {
                note.notebook_id = notebook_id.to_string();
                note.updated_at = now_ms;
                true
            }
            None => false,
        }
    }

    fn notebook_mut(&mut self, notebook_id: &str) -> Option<&mut Notebook> {
        self.notebooks
            .iter_mut()
            .find(|notebook| notebook.id == notebook_id)
    }
}

/// Orders display names the way the sidebar lists them.
///
/// Levels, first difference wins: base letters (accents and case ignored),
/// accents, then case with lowercase first at the first differing character.
/// Raw code points break what remains.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    let primary = base_letters(left).cmp(base_letters(right));
    if primary != Ordering::Equal {
        return primary;
    }

    let accents = folded_case(left).cmp(folded_case(right));
    if accents != Ordering::Equal {
        return accents;
    }

    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            continue;
        }
        return match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => l.cmp(&r),
        };
    }
    left.cmp(right)
}

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded_case(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().flat_map(char::to_lowercase)
}
