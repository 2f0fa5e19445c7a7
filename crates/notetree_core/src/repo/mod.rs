//! Note store contracts and implementations.
//!
//! # Responsibility
//! - Define the data access contract the workspace uses for notes.
//! - Isolate SQLite query details from workspace orchestration.
//!
//! # Invariants
//! - Writes reject notes with a blank id or blank owning notebook.
//! - Missing rows surface as `NotFound`, not as silent no-ops.

use crate::db::DbError;
use crate::model::note::NoteId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Note store failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
