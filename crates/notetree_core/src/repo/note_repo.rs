//! Note repository contract with in-memory and SQLite implementations.
//!
//! # Responsibility
//! - Persist whole note records keyed by id.
//! - List every stored note for the workspace tree.
//!
//! # Invariants
//! - `list_notes` returns rows in insertion order; sorting is a tree concern.
//! - `update_note` overwrites title, content, owning notebook and `updated_at`.

use crate::model::note::{Note, NoteId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::cell::RefCell;

/// Storage contract for notes.
pub trait NoteRepository {
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    fn get_note(&self, note_id: &str) -> RepoResult<Option<Note>>;
    /// Inserts one note and returns its id.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Overwrites an existing note.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, note_id: &str) -> RepoResult<()>;
}

fn validate(note: &Note) -> RepoResult<()> {
    if note.id.trim().is_empty() {
        return Err(RepoError::InvalidData("note id cannot be blank".to_string()));
    }
    if note.notebook_id.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "note {} has no owning notebook",
            note.id
        )));
    }
    Ok(())
}

/// Process-local note store.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    notes: RefCell<Vec<Note>>,
}

impl MemoryNoteRepository {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes: RefCell::new(notes),
        }
    }
}

impl NoteRepository for MemoryNoteRepository {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        Ok(self.notes.borrow().clone())
    }

    fn get_note(&self, note_id: &str) -> RepoResult<Option<Note>> {
        Ok(self
            .notes
            .borrow()
            .iter()
            .find(|note| note.id == note_id)
            .cloned())
    }

    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        validate(note)?;
        let mut notes = self.notes.borrow_mut();
        if notes.iter().any(|existing| existing.id == note.id) {
            return Err(RepoError::InvalidData(format!(
                "note id already exists: {}",
                note.id
            )));
        }
        notes.push(note.clone());
        Ok(note.id.clone())
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        validate(note)?;
        let mut notes = self.notes.borrow_mut();
        let existing = notes
            .iter_mut()
            .find(|existing| existing.id == note.id)
            .ok_or_else(|| RepoError::NotFound(note.id.clone()))?;
        *existing = note.clone();
        Ok(())
    }

    fn delete_note(&self, note_id: &str) -> RepoResult<()> {
        let mut notes = self.notes.borrow_mut();
        let before = notes.len();
        notes.retain(|note| note.id != note_id);
        if notes.len() == before {
            return Err(RepoError::NotFound(note_id.to_string()));
        }
        Ok(())
    }
}

/// SQLite-backed note store on a migrated connection.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, notebook_id, created_at, updated_at
             FROM notes
             ORDER BY rowid ASC;",
        )?;
        let notes = stmt
            .query_map([], map_note_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    fn get_note(&self, note_id: &str) -> RepoResult<Option<Note>> {
        let note = self
            .conn
            .query_row(
                "SELECT id, title, content, notebook_id, created_at, updated_at
                 FROM notes
                 WHERE id = ?1;",
                [note_id],
                map_note_row,
            )
            .optional()?;
        Ok(note)
    }

    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        validate(note)?;
        self.conn.execute(
            "INSERT INTO notes (id, title, content, notebook_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.id,
                note.title,
                note.content,
                note.notebook_id,
                note.created_at,
                note.updated_at,
            ],
        )?;
        Ok(note.id.clone())
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        validate(note)?;
        let changed = self.conn.execute(
            "UPDATE notes
             SET title = ?2, content = ?3, notebook_id = ?4, updated_at = ?5
             WHERE id = ?1;",
            params![
                note.id,
                note.title,
                note.content,
                note.notebook_id,
                note.updated_at,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(note.id.clone()));
        }
        Ok(())
    }

    fn delete_note(&self, note_id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [note_id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(note_id.to_string()));
        }
        Ok(())
    }
}

fn map_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        notebook_id: row.get("notebook_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
