//! Event reducer for [`AppState`].
//!
//! # Responsibility
//! - Apply one UI or I/O-completion event to the state.
//! - Report, via [`Effect`], which I/O the owner should run next.
//!
//! # Invariants
//! - `reduce` performs no I/O and reads no clock; time comes in as `now_ms`.
//! - Every `*Started` event that returns an I/O effect sets the matching
//!   in-flight flag; the paired completion/failure event clears it.

use crate::model::note::{Note, NoteId};
use crate::model::notebook::{Notebook, NotebookId};
use crate::state::drag::{apply_move, validate_move, DragItem, DropTarget, MoveRejection, MoveRequest};
use crate::state::AppState;

/// Input to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NotebooksLoaded(Vec<Notebook>),
    NotesLoaded(Vec<Note>),
    NotebookClicked(NotebookId),
    NoteClicked(NoteId),
    ToggleExpanded(NotebookId),
    SearchResultChosen(NoteId),
    ClearSelection,
    DragStarted(DragItem),
    DragEntered(DropTarget),
    DragLeft,
    DragCancelled,
    Dropped(DropTarget),
    MoveCommitted(MoveRequest),
    MoveFailed,
    NoteCreateStarted,
    NoteCreated(Note),
    NoteCreateFailed,
    NotebookCreateStarted,
    NotebookCreateFinished {
        parent_id: Option<NotebookId>,
        succeeded: bool,
    },
    NoteDeleteStarted(NoteId),
    NoteDeleted(NoteId),
    NoteDeleteFailed,
    NotebookDeleteStarted(NotebookId),
    NotebookDeleted(NotebookId),
    NotebookDeleteFailed,
    NotebookRenamed {
        notebook_id: NotebookId,
        name: String,
    },
    NoteSaved {
        note_id: NoteId,
        title: String,
        content: String,
    },
}

/// What the owner of the state must do after a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// State changed (or not); nothing else to run.
    None,
    /// A guard dropped the event.
    Ignored,
    /// A drop or commit was refused.
    Rejected(MoveRejection),
    /// Persist this move, then report `MoveCommitted`/`MoveFailed`.
    Move(MoveRequest),
    CreateNote { notebook_id: NotebookId },
    CreateNotebook { parent_id: Option<NotebookId> },
    DeleteNote(NoteId),
    DeleteNotebook(NotebookId),
}

/// Applies one event to `state`.
pub fn reduce(state: &mut AppState, event: Event, now_ms: i64) -> Effect {
    match event {
        Event::NotebooksLoaded(notebooks) => {
            state.tree.replace_notebooks(notebooks);
            Effect::None
        }
        Event::NotesLoaded(notes) => {
            state.tree.replace_notes(notes);
            Effect::None
        }
        Event::NotebookClicked(notebook_id) => {
            if state.in_flight.moving
                || state.in_flight.is_deleting_notebook(&notebook_id)
                || state.tree.notebook(&notebook_id).is_none()
            {
                return Effect::Ignored;
            }
            if state.tree.has_children(&notebook_id) {
                state.expanded.toggle(&notebook_id);
            }
            state.selection.select_notebook(notebook_id);
            Effect::None
        }
        Event::NoteClicked(note_id) => {
            if state.in_flight.moving || state.in_flight.is_deleting_note(&note_id) {
                return Effect::Ignored;
            }
            select_note(state, note_id)
        }
        Event::ToggleExpanded(notebook_id) => {
            state.expanded.toggle(&notebook_id);
            Effect::None
        }
        Event::SearchResultChosen(note_id) => select_note(state, note_id),
        Event::ClearSelection => {
            state.selection.clear();
            Effect::None
        }
        Event::DragStarted(item) => {
            if state.drag.begin(item, state.in_flight.blocks_gestures()) {
                Effect::None
            } else {
                Effect::Ignored
            }
        }
        Event::DragEntered(target) => {
            if state.drag.enter(target, state.in_flight.blocks_gestures()) {
                Effect::None
            } else {
                Effect::Ignored
            }
        }
        Event::DragLeft => {
            state.drag.leave();
            Effect::None
        }
        Event::DragCancelled => {
            state.drag.cancel();
            Effect::None
        }
        Event::Dropped(target) => {
            let busy = state.in_flight.blocks_gestures();
            let request = match state.drag.drop_on(target, busy) {
                Ok(request) => request,
                Err(rejection) => return Effect::Rejected(rejection),
            };
            if let Err(rejection) = validate_move(&state.tree, &request) {
                return Effect::Rejected(rejection);
            }
            state.in_flight.moving = true;
            Effect::Move(request)
        }
        Event::MoveCommitted(request) => {
            state.in_flight.moving = false;
            match apply_move(&mut state.tree, &mut state.expanded, &request, now_ms) {
                Ok(()) => Effect::None,
                Err(rejection) => Effect::Rejected(rejection),
            }
        }
        Event::MoveFailed => {
            state.in_flight.moving = false;
            Effect::None
        }
        Event::NoteCreateStarted => {
            if state.in_flight.creating_note {
                return Effect::Ignored;
            }
            let Some(notebook_id) = state.selection.notebook_id.clone() else {
                return Effect::Ignored;
            };
            state.in_flight.creating_note = true;
            Effect::CreateNote { notebook_id }
        }
        Event::NoteCreated(note) => {
            state.in_flight.creating_note = false;
            state.expanded.expand(note.notebook_id.clone());
            state.selection.note_id = Some(note.id.clone());
            state.tree.insert_note(note);
            Effect::None
        }
        Event::NoteCreateFailed => {
            state.in_flight.creating_note = false;
            Effect::None
        }
        Event::NotebookCreateStarted => {
            if state.in_flight.creating_notebook {
                return Effect::Ignored;
            }
            state.in_flight.creating_notebook = true;
            Effect::CreateNotebook {
                parent_id: state.selection.notebook_id.clone(),
            }
        }
        Event::NotebookCreateFinished {
            parent_id,
            succeeded,
        } => {
            state.in_flight.creating_notebook = false;
            if let (true, Some(parent_id)) = (succeeded, parent_id) {
                state.expanded.expand(parent_id);
            }
            Effect::None
        }
        Event::NoteDeleteStarted(note_id) => {
            if state.in_flight.is_deleting_note(&note_id) {
                return Effect::Ignored;
            }
            state.in_flight.deleting_note = Some(note_id.clone());
            Effect::DeleteNote(note_id)
        }
        Event::NoteDeleted(note_id) => {
            state.tree.remove_note(&note_id);
            if state.selection.is_note_selected(&note_id) {
                state.selection.note_id = None;
            }
            state.in_flight.deleting_note = None;
            Effect::None
        }
        Event::NoteDeleteFailed => {
            state.in_flight.deleting_note = None;
            Effect::None
        }
        Event::NotebookDeleteStarted(notebook_id) => {
            if state.in_flight.is_deleting_notebook(&notebook_id) {
                return Effect::Ignored;
            }
            state.in_flight.deleting_notebook = Some(notebook_id.clone());
            Effect::DeleteNotebook(notebook_id)
        }
        Event::NotebookDeleted(notebook_id) => {
            state.tree.remove_notebook(&notebook_id);
            state.expanded.collapse(&notebook_id);
            if state.selection.is_notebook_selected(&notebook_id) {
                state.selection.clear();
            }
            state.in_flight.deleting_notebook = None;
            Effect::None
        }
        Event::NotebookDeleteFailed => {
            state.in_flight.deleting_notebook = None;
            Effect::None
        }
        Event::NotebookRenamed { notebook_id, name } => {
            let trimmed = name.trim();
            if trimmed.is_empty() || !state.tree.rename_notebook(&notebook_id, trimmed, now_ms) {
                return Effect::Ignored;
            }
            Effect::None
        }
        Event::NoteSaved {
            note_id,
            title,
            content,
        } => {
            if state.tree.update_note(&note_id, &title, &content, now_ms) {
                Effect::None
            } else {
                Effect::Ignored
            }
        }
    }
}

fn select_note(state: &mut AppState, note_id: NoteId) -> Effect {
    let Some(notebook_id) = state.tree.note(&note_id).map(|note| note.notebook_id.clone()) else {
        return Effect::Ignored;
    };
    state.selection.select_note(note_id, notebook_id);
    Effect::None
}
