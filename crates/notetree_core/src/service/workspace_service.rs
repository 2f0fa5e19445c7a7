//! Workspace controller for the notebook browser.
//!
//! # Responsibility
//! - Own [`AppState`] together with the notebook API and the note store.
//! - Translate reducer effects into API/store calls and feed the outcome back
//!   through [`reduce`].
//!
//! # Invariants
//! - Every in-flight flag taken for an I/O call is released on both success
//!   and failure.
//! - Note moves and saves are persisted before the tree changes.
//! - Notebook moves and renames stay local; the API has no endpoint for them.
//! - Log lines carry ids and durations only, never titles or content.

use crate::api::{ApiError, NotebookApi};
use crate::model::note::{Note, NoteId};
use crate::model::notebook::{NotebookId, DEFAULT_NOTEBOOK_NAME};
use crate::model::now_epoch_ms;
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use crate::search::filter::search_notes;
use crate::service::editor::NoteDraft;
use crate::state::drag::{DragItem, DropTarget, MoveRejection, MoveRequest};
use crate::state::reducer::{reduce, Effect, Event};
use crate::state::rows::{visible_rows, TreeRow};
use crate::state::AppState;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Failure of a workspace operation.
#[derive(Debug)]
pub enum WorkspaceError {
    Api(ApiError),
    Repo(RepoError),
    Rejected(MoveRejection),
    /// The same kind of operation is already in flight.
    Busy,
    /// Creating a note requires a selected notebook.
    NothingSelected,
    NoteNotFound(NoteId),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(err) => write!(f, "notebook api error: {err}"),
            Self::Repo(err) => write!(f, "note store error: {err}"),
            Self::Rejected(rejection) => write!(f, "move rejected: {rejection}"),
            Self::Busy => write!(f, "operation already in progress"),
            Self::NothingSelected => write!(f, "no notebook selected"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Rejected(rejection) => Some(rejection),
            Self::Busy | Self::NothingSelected | Self::NoteNotFound(_) => None,
        }
    }
}

impl From<ApiError> for WorkspaceError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<RepoError> for WorkspaceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<MoveRejection> for WorkspaceError {
    fn from(value: MoveRejection) -> Self {
        Self::Rejected(value)
    }
}

/// Browser controller generic over its notebook API and note store.
pub struct WorkspaceService<A: NotebookApi, R: NoteRepository> {
    api: A,
    notes: R,
    state: AppState,
    clock: fn() -> i64,
}

impl<A: NotebookApi, R: NoteRepository> WorkspaceService<A, R> {
    /// Creates a service with an empty tree. Call [`Self::load`] next.
    pub fn new(api: A, notes: R) -> Self {
        Self::with_clock(api, notes, now_epoch_ms)
    }

    /// Same as [`Self::new`] with an explicit epoch-ms clock.
    pub fn with_clock(api: A, notes: R, clock: fn() -> i64) -> Self {
        Self {
            api,
            notes,
            state: AppState::default(),
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn note_store(&self) -> &R {
        &self.notes
    }

    /// Fetches notebooks from the API and notes from the store.
    pub fn load(&mut self) -> WorkspaceResult<()> {
        let started_at = Instant::now();
        let result = self.fetch_notebooks().and_then(|()| {
            let notes = self.notes.list_notes()?;
            self.apply(Event::NotesLoaded(notes));
            Ok(())
        });
        match &result {
            Ok(()) => info!(
                "event=workspace_load module=workspace status=ok notebooks={} notes={} duration_ms={}",
                self.state.tree.notebooks().len(),
                self.state.tree.notes().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=workspace_load module=workspace status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Selects a notebook and toggles it when it has children.
    ///
    /// Returns `false` when the click was ignored.
    pub fn click_notebook(&mut self, notebook_id: &str) -> bool {
        self.apply(Event::NotebookClicked(notebook_id.to_string())) != Effect::Ignored
    }

    /// Selects a note and its owning notebook.
    pub fn click_note(&mut self, note_id: &str) -> bool {
        self.apply(Event::NoteClicked(note_id.to_string())) != Effect::Ignored
    }

    /// Flips expansion without changing the selection.
    pub fn toggle_notebook(&mut self, notebook_id: &str) {
        self.apply(Event::ToggleExpanded(notebook_id.to_string()));
    }

    pub fn clear_selection(&mut self) {
        self.apply(Event::ClearSelection);
    }

    /// Opens a search hit like a note click, without the in-flight guard.
    pub fn choose_search_result(&mut self, note_id: &str) -> bool {
        self.apply(Event::SearchResultChosen(note_id.to_string())) != Effect::Ignored
    }

    /// Filters notes by `query`. See [`search_notes`].
    pub fn search(&self, query: &str) -> Vec<&Note> {
        search_notes(self.state.tree.notes(), query)
    }

    /// Starts a drag gesture. Returns `false` while a move/delete is in flight.
    pub fn begin_drag(&mut self, item: DragItem) -> bool {
        self.apply(Event::DragStarted(item)) != Effect::Ignored
    }

    /// Highlights the target under the pointer.
    pub fn drag_over(&mut self, target: DropTarget) -> bool {
        self.apply(Event::DragEntered(target)) != Effect::Ignored
    }

    pub fn drag_leave(&mut self) {
        self.apply(Event::DragLeft);
    }

    pub fn cancel_drag(&mut self) {
        self.apply(Event::DragCancelled);
    }

    /// Ends the drag on `target` and commits the resulting move.
    ///
    /// # Errors
    /// - [`WorkspaceError::Rejected`] when the drop is invalid; nothing changes.
    /// - [`WorkspaceError::Repo`] when persisting a note move fails.
    pub fn drop_on(&mut self, target: DropTarget) -> WorkspaceResult<()> {
        let started_at = Instant::now();
        let request = match self.apply(Event::Dropped(target)) {
            Effect::Move(request) => request,
            Effect::Rejected(rejection) => {
                info!(
                    "event=tree_move module=workspace status=rejected reason={rejection}"
                );
                return Err(rejection.into());
            }
            _ => return Err(WorkspaceError::Busy),
        };

        if let Err(err) = self.persist_move(&request) {
            self.apply(Event::MoveFailed);
            warn!(
                "event=tree_move module=workspace status=error {} duration_ms={} error={err}",
                describe_move(&request),
                started_at.elapsed().as_millis()
            );
            return Err(err);
        }

        let outcome = match self.apply(Event::MoveCommitted(request.clone())) {
            Effect::Rejected(rejection) => Err(WorkspaceError::Rejected(rejection)),
            _ => Ok(()),
        };
        info!(
            "event=tree_move module=workspace status={} {} duration_ms={}",
            if outcome.is_ok() { "ok" } else { "rejected" },
            describe_move(&request),
            started_at.elapsed().as_millis()
        );
        outcome
    }

    /// Creates an untitled note in the selected notebook and selects it.
    pub fn create_note(&mut self) -> WorkspaceResult<NoteId> {
        if self.state.selection.notebook_id.is_none() {
            return Err(WorkspaceError::NothingSelected);
        }
        let notebook_id = match self.apply(Event::NoteCreateStarted) {
            Effect::CreateNote { notebook_id } => notebook_id,
            _ => return Err(WorkspaceError::Busy),
        };

        let note = Note::untitled(notebook_id, self.now());
        match self.notes.create_note(&note) {
            Ok(note_id) => {
                info!(
                    "event=note_create module=workspace status=ok note_id={note_id} notebook_id={}",
                    note.notebook_id
                );
                self.apply(Event::NoteCreated(note));
                Ok(note_id)
            }
            Err(err) => {
                self.apply(Event::NoteCreateFailed);
                warn!("event=note_create module=workspace status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Creates `New Notebook` under the selected notebook (or at root) and
    /// refreshes the notebook list.
    pub fn create_notebook(&mut self) -> WorkspaceResult<NotebookId> {
        let parent_id = match self.apply(Event::NotebookCreateStarted) {
            Effect::CreateNotebook { parent_id } => parent_id,
            _ => return Err(WorkspaceError::Busy),
        };

        let result = self
            .api
            .create_notebook(DEFAULT_NOTEBOOK_NAME, parent_id.as_deref())
            .map_err(WorkspaceError::from)
            .and_then(|notebook_id| self.fetch_notebooks().map(|()| notebook_id));
        self.apply(Event::NotebookCreateFinished {
            parent_id: parent_id.clone(),
            succeeded: result.is_ok(),
        });

        match &result {
            Ok(notebook_id) => info!(
                "event=notebook_create module=workspace status=ok notebook_id={notebook_id} parent_id={}",
                parent_id.as_deref().unwrap_or("root")
            ),
            Err(err) => warn!("event=notebook_create module=workspace status=error error={err}"),
        }
        result
    }

    /// Deletes one note from the store and the tree.
    pub fn delete_note(&mut self, note_id: &str) -> WorkspaceResult<()> {
        if self.state.tree.note(note_id).is_none() {
            return Err(WorkspaceError::NoteNotFound(note_id.to_string()));
        }
        let note_id = match self.apply(Event::NoteDeleteStarted(note_id.to_string())) {
            Effect::DeleteNote(note_id) => note_id,
            _ => return Err(WorkspaceError::Busy),
        };

        match self.notes.delete_note(&note_id) {
            Ok(()) => {
                info!("event=note_delete module=workspace status=ok note_id={note_id}");
                self.apply(Event::NoteDeleted(note_id));
                Ok(())
            }
            Err(err) => {
                self.apply(Event::NoteDeleteFailed);
                warn!(
                    "event=note_delete module=workspace status=error note_id={note_id} error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Deletes one notebook through the API, then re-fetches the list.
    ///
    /// Child notebooks and notes are not cascaded.
    pub fn delete_notebook(&mut self, notebook_id: &str) -> WorkspaceResult<()> {
        let notebook_id = match self.apply(Event::NotebookDeleteStarted(notebook_id.to_string())) {
            Effect::DeleteNotebook(notebook_id) => notebook_id,
            _ => return Err(WorkspaceError::Busy),
        };

        if let Err(err) = self.api.delete_notebook(&notebook_id) {
            self.apply(Event::NotebookDeleteFailed);
            warn!(
                "event=notebook_delete module=workspace status=error notebook_id={notebook_id} error={err}"
            );
            return Err(err.into());
        }

        info!("event=notebook_delete module=workspace status=ok notebook_id={notebook_id}");
        self.apply(Event::NotebookDeleted(notebook_id));
        self.fetch_notebooks()
    }

    /// Renames a notebook locally. Blank names are ignored.
    pub fn rename_notebook(&mut self, notebook_id: &str, name: &str) -> bool {
        self.apply(Event::NotebookRenamed {
            notebook_id: notebook_id.to_string(),
            name: name.to_string(),
        }) != Effect::Ignored
    }

    /// Persists an editor draft for `note_id` and updates the tree.
    pub fn save_note(&mut self, note_id: &str, draft: &NoteDraft) -> WorkspaceResult<()> {
        let now_ms = self.now();
        let mut note = self
            .state
            .tree
            .note(note_id)
            .cloned()
            .ok_or_else(|| WorkspaceError::NoteNotFound(note_id.to_string()))?;
        note.title.clone_from(&draft.title);
        note.content.clone_from(&draft.content);
        note.updated_at = now_ms;

        if let Err(err) = self.notes.update_note(&note) {
            warn!("event=note_save module=workspace status=error note_id={note_id} error={err}");
            return Err(err.into());
        }
        self.apply(Event::NoteSaved {
            note_id: note.id,
            title: note.title,
            content: note.content,
        });
        info!("event=note_save module=workspace status=ok note_id={note_id}");
        Ok(())
    }

    /// Note shown in the editor pane.
    pub fn current_note(&self) -> Option<&Note> {
        self.state.current_note()
    }

    /// Expanded part of the tree in display order.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        visible_rows(&self.state)
    }

    fn fetch_notebooks(&mut self) -> WorkspaceResult<()> {
        let notebooks = self.api.list_notebooks()?;
        self.apply(Event::NotebooksLoaded(notebooks));
        Ok(())
    }

    fn persist_move(&self, request: &MoveRequest) -> WorkspaceResult<()> {
        let MoveRequest::Note { note_id, target_id } = request else {
            return Ok(());
        };
        let mut note = self
            .state
            .tree
            .note(note_id)
            .cloned()
            .ok_or_else(|| WorkspaceError::NoteNotFound(note_id.clone()))?;
        note.notebook_id.clone_from(target_id);
        note.updated_at = self.now();
        self.notes.update_note(&note)?;
        Ok(())
    }

    fn apply(&mut self, event: Event) -> Effect {
        let now_ms = self.now();
        reduce(&mut self.state, event, now_ms)
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }
}

fn describe_move(request: &MoveRequest) -> String {
    match request {
        MoveRequest::Note { note_id, target_id } => {
            format!("kind=note note_id={note_id} target_id={target_id}")
        }
        MoveRequest::Notebook {
            notebook_id,
            new_parent_id,
        } => format!(
            "kind=notebook notebook_id={notebook_id} target_id={}",
            new_parent_id.as_deref().unwrap_or("root")
        ),
    }
}
