//! Drag-and-drop reparenting engine.
//!
//! # Responsibility
//! - Track one drag gesture: `Idle -> Dragging -> Hovering -> Idle`.
//! - Turn a drop into a typed move request and validate it against the tree.
//! - Apply validated moves to the tree and expansion state.
//!
//! # Invariants
//! - No gesture starts, hovers or drops while any move/delete is in flight.
//! - A notebook is never moved into its own subtree.
//! - Every rejection leaves tree and expansion state untouched.

use crate::model::note::NoteId;
use crate::model::notebook::NotebookId;
use crate::model::tree::NotebookTree;
use crate::state::selection::ExpansionSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Item picked up by a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Note(NoteId),
    Notebook(NotebookId),
}

/// Surface the pointer hovers or drops on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Notebook(NotebookId),
    Note(NoteId),
    /// Empty sidebar area; promotes notebooks to root.
    Root,
}

/// Phase of the current drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        source: DragItem,
    },
    Hovering {
        source: DragItem,
        target: DropTarget,
    },
}

/// Validated-or-not move derived from a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    /// Reassign a note to another notebook.
    Note {
        note_id: NoteId,
        target_id: NotebookId,
    },
    /// Re-parent a notebook. `None` promotes it to root.
    Notebook {
        notebook_id: NotebookId,
        new_parent_id: Option<NotebookId>,
    },
}

impl MoveRequest {
    /// Maps a `(source, target)` pair onto a move.
    ///
    /// Notes only land on notebooks; notebooks land on notebooks or root.
    pub fn from_drop(source: DragItem, target: DropTarget) -> Result<Self, MoveRejection> {
        match (source, target) {
            (DragItem::Note(note_id), DropTarget::Notebook(target_id)) => Ok(Self::Note {
                note_id,
                target_id,
            }),
            (DragItem::Notebook(notebook_id), DropTarget::Notebook(target_id)) => {
                if notebook_id == target_id {
                    return Err(MoveRejection::SameNotebook(notebook_id));
                }
                Ok(Self::Notebook {
                    notebook_id,
                    new_parent_id: Some(target_id),
                })
            }
            (DragItem::Notebook(notebook_id), DropTarget::Root) => Ok(Self::Notebook {
                notebook_id,
                new_parent_id: None,
            }),
            _ => Err(MoveRejection::UnsupportedTarget),
        }
    }

    /// Notebook that should be expanded once the move lands.
    pub fn expand_target(&self) -> Option<&str> {
        match self {
            Self::Note { target_id, .. } => Some(target_id.as_str()),
            Self::Notebook { new_parent_id, .. } => new_parent_id.as_deref(),
        }
    }
}

/// Reasons a drag gesture or move does not change anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// Another move or delete is in flight.
    Busy,
    /// Drop arrived without a started gesture.
    NoActiveDrag,
    /// Source cannot be dropped on this target kind.
    UnsupportedTarget,
    /// Notebook dropped onto itself.
    SameNotebook(NotebookId),
    /// Target lies inside the moved notebook's subtree.
    CycleDetected {
        notebook_id: NotebookId,
        target_id: NotebookId,
    },
    NoteNotFound(NoteId),
    NotebookNotFound(NotebookId),
}

impl Display for MoveRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy => write!(f, "another move or delete is in progress"),
            Self::NoActiveDrag => write!(f, "no drag gesture in progress"),
            Self::UnsupportedTarget => write!(f, "drop target does not accept this item"),
            Self::SameNotebook(id) => write!(f, "notebook cannot be moved onto itself: {id}"),
            Self::CycleDetected {
                notebook_id,
                target_id,
            } => write!(
                f,
                "move would create cycle: notebook {notebook_id} under {target_id}"
            ),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::NotebookNotFound(id) => write!(f, "notebook not found: {id}"),
        }
    }
}

impl Error for MoveRejection {}

/// One drag gesture's state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    phase: DragPhase,
}

impl DragSession {
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    /// Item being dragged, if any.
    pub fn source(&self) -> Option<&DragItem> {
        match &self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { source } | DragPhase::Hovering { source, .. } => Some(source),
        }
    }

    /// Target currently highlighted, if any.
    pub fn hover_target(&self) -> Option<&DropTarget> {
        match &self.phase {
            DragPhase::Hovering { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Starts a gesture. Suppressed (returns `false`) while `busy`.
    pub fn begin(&mut self, item: DragItem, busy: bool) -> bool {
        if busy {
            return false;
        }
        self.phase = DragPhase::Dragging { source: item };
        true
    }

    /// Highlights a target under the pointer.
    pub fn enter(&mut self, target: DropTarget, busy: bool) -> bool {
        if busy {
            return false;
        }
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => false,
            DragPhase::Dragging { source } | DragPhase::Hovering { source, .. } => {
                self.phase = DragPhase::Hovering { source, target };
                true
            }
        }
    }

    /// Pointer left the highlighted target.
    pub fn leave(&mut self) {
        if let DragPhase::Hovering { source, .. } = std::mem::take(&mut self.phase) {
            self.phase = DragPhase::Dragging { source };
        }
    }

    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Ends the gesture on `target`. The session is idle afterwards whatever
    /// the outcome.
    pub fn drop_on(&mut self, target: DropTarget, busy: bool) -> Result<MoveRequest, MoveRejection> {
        let phase = std::mem::take(&mut self.phase);
        if busy {
            return Err(MoveRejection::Busy);
        }
        let source = match phase {
            DragPhase::Idle => return Err(MoveRejection::NoActiveDrag),
            DragPhase::Dragging { source } | DragPhase::Hovering { source, .. } => source,
        };
        MoveRequest::from_drop(source, target)
    }
}

/// Checks a move against current tree contents.
pub fn validate_move(tree: &NotebookTree, request: &MoveRequest) -> Result<(), MoveRejection> {
    match request {
        MoveRequest::Note { note_id, target_id } => {
            if tree.note(note_id).is_none() {
                return Err(MoveRejection::NoteNotFound(note_id.clone()));
            }
            if tree.notebook(target_id).is_none() {
                return Err(MoveRejection::NotebookNotFound(target_id.clone()));
            }
            Ok(())
        }
        MoveRequest::Notebook {
            notebook_id,
            new_parent_id,
        } => {
            if tree.notebook(notebook_id).is_none() {
                return Err(MoveRejection::NotebookNotFound(notebook_id.clone()));
            }
            let Some(target_id) = new_parent_id else {
                return Ok(());
            };
            if target_id == notebook_id {
                return Err(MoveRejection::SameNotebook(notebook_id.clone()));
            }
            if tree.notebook(target_id).is_none() {
                return Err(MoveRejection::NotebookNotFound(target_id.clone()));
            }
            if tree.descendant_ids(notebook_id).contains(target_id) {
                return Err(MoveRejection::CycleDetected {
                    notebook_id: notebook_id.clone(),
                    target_id: target_id.clone(),
                });
            }
            Ok(())
        }
    }
}

/// Validates and applies one move, expanding the receiving notebook.
pub fn apply_move(
    tree: &mut NotebookTree,
    expanded: &mut ExpansionSet,
    request: &MoveRequest,
    now_ms: i64,
) -> Result<(), MoveRejection> {
    validate_move(tree, request)?;

    match request {
        MoveRequest::Note { note_id, target_id } => {
            tree.set_note_notebook(note_id, target_id, now_ms);
        }
        MoveRequest::Notebook {
            notebook_id,
            new_parent_id,
        } => {
            tree.set_notebook_parent(notebook_id, new_parent_id.clone(), now_ms);
        }
    }
    if let Some(target_id) = request.expand_target() {
        expanded.expand(target_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DragItem, DragPhase, DragSession, DropTarget, MoveRejection, MoveRequest};

    #[test]
    fn gesture_walks_through_phases() {
        let mut session = DragSession::default();
        assert!(session.begin(DragItem::Note("n1".into()), false));
        assert!(session.enter(DropTarget::Notebook("a".into()), false));
        assert_eq!(
            session.hover_target(),
            Some(&DropTarget::Notebook("a".into()))
        );

        session.leave();
        assert_eq!(
            session.phase(),
            &DragPhase::Dragging {
                source: DragItem::Note("n1".into())
            }
        );

        let request = session
            .drop_on(DropTarget::Notebook("b".into()), false)
            .unwrap();
        assert_eq!(
            request,
            MoveRequest::Note {
                note_id: "n1".into(),
                target_id: "b".into()
            }
        );
        assert!(session.is_idle());
    }

    #[test]
    fn begin_is_suppressed_while_busy() {
        let mut session = DragSession::default();
        assert!(!session.begin(DragItem::Notebook("a".into()), true));
        assert!(session.is_idle());
    }

    #[test]
    fn enter_without_gesture_is_ignored() {
        let mut session = DragSession::default();
        assert!(!session.enter(DropTarget::Root, false));
        assert!(session.is_idle());
    }

    #[test]
    fn drop_maps_unsupported_pairs_to_rejection() {
        assert_eq!(
            MoveRequest::from_drop(DragItem::Note("n".into()), DropTarget::Root),
            Err(MoveRejection::UnsupportedTarget)
        );
        assert_eq!(
            MoveRequest::from_drop(DragItem::Notebook("a".into()), DropTarget::Note("n".into())),
            Err(MoveRejection::UnsupportedTarget)
        );
        assert_eq!(
            MoveRequest::from_drop(
                DragItem::Notebook("a".into()),
                DropTarget::Notebook("a".into())
            ),
            Err(MoveRejection::SameNotebook("a".into()))
        );
    }

    #[test]
    fn drop_while_busy_resets_gesture() {
        let mut session = DragSession::default();
        session.begin(DragItem::Notebook("a".into()), false);
        let err = session.drop_on(DropTarget::Root, true).unwrap_err();
        assert_eq!(err, MoveRejection::Busy);
        assert!(session.is_idle());
    }
}
