use notetree_core::db::{open_db, open_db_in_memory};
use notetree_core::seed::demo_notes;
use notetree_core::{Note, NoteRepository, RepoError, SqliteNoteRepository};

#[test]
fn sqlite_store_round_trips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let note = Note::with_id("n1", "notebook-1", "Title", "# Body\n\n- item", 7);

    assert_eq!(repo.create_note(&note).unwrap(), "n1");
    assert_eq!(repo.get_note("n1").unwrap(), Some(note));
    assert_eq!(repo.get_note("missing").unwrap(), None);
}

#[test]
fn sqlite_list_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    for note in demo_notes().into_iter().rev() {
        repo.create_note(&note).unwrap();
    }

    let ids = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["note-4", "note-3", "note-2", "note-1"]);
}

#[test]
fn sqlite_update_overwrites_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let mut note = Note::with_id("n1", "notebook-1", "Title", "Body", 1);
    repo.create_note(&note).unwrap();

    note.notebook_id = "notebook-2".to_string();
    note.title = "Renamed".to_string();
    note.updated_at = 2;
    repo.update_note(&note).unwrap();

    let stored = repo.get_note("n1").unwrap().unwrap();
    assert_eq!(stored.notebook_id, "notebook-2");
    assert_eq!(stored.title, "Renamed");
    assert_eq!(stored.created_at, 1);
    assert_eq!(stored.updated_at, 2);

    let ghost = Note::with_id("ghost", "notebook-1", "", "", 0);
    assert!(matches!(
        repo.update_note(&ghost).unwrap_err(),
        RepoError::NotFound(id) if id == "ghost"
    ));
}

#[test]
fn sqlite_delete_removes_row_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::with_id("n1", "nb", "T", "", 0))
        .unwrap();

    repo.delete_note("n1").unwrap();
    assert!(repo.list_notes().unwrap().is_empty());
    assert!(matches!(
        repo.delete_note("n1").unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn sqlite_duplicate_id_is_a_db_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let note = Note::with_id("n1", "nb", "T", "", 0);
    repo.create_note(&note).unwrap();

    assert!(matches!(repo.create_note(&note).unwrap_err(), RepoError::Db(_)));
}

#[test]
fn notes_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteNoteRepository::new(&conn);
        for note in demo_notes() {
            repo.create_note(&note).unwrap();
        }
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    assert_eq!(repo.list_notes().unwrap(), demo_notes());
}
