//! Note editor draft state.
//!
//! # Responsibility
//! - Hold the per-note `{title, content}` draft and its dirty flag.
//! - Format the "last updated" label shown under the title.
//!
//! # Invariants
//! - The draft is re-initialized whenever the displayed note id changes.
//! - `has_changes` compares the draft against the latest synced source.
//! - Saving never checks for concurrent external edits.

use crate::model::note::{Note, NoteId};
use chrono::{DateTime, Local, TimeZone};

/// Title/content pair committed by a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

/// Editor pane state for one displayed note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    note_id: NoteId,
    draft: NoteDraft,
    source: NoteDraft,
    preview: bool,
}

impl EditorState {
    /// Opens an editor initialized from `note`.
    pub fn open(note: &Note) -> Self {
        let source = NoteDraft {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        Self {
            note_id: note.id.clone(),
            draft: source.clone(),
            source,
            preview: false,
        }
    }

    /// Re-syncs with the note currently displayed.
    ///
    /// A different note id resets the draft. The same id only refreshes the
    /// comparison baseline; the draft is kept.
    ///
    /// Title or content changes arriving for the same id never discard unsaved
    /// edits; only switching notes does.
    pub fn sync(&mut self, note: &Note) {
        if note.id != self.note_id {
            let preview = self.preview;
            *self = Self::open(note);
            self.preview = preview;
            return;
        }
        self.source.title.clone_from(&note.title);
        self.source.content.clone_from(&note.content);
    }

    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Returns whether the draft differs from the source note.
    pub fn has_changes(&self) -> bool {
        self.draft != self.source
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Flips between edit and preview mode.
    pub fn toggle_preview(&mut self) -> bool {
        self.preview = !self.preview;
        self.preview
    }

    /// Takes the draft for committing and clears the dirty flag.
    pub fn save(&mut self) -> NoteDraft {
        self.source = self.draft.clone();
        self.draft.clone()
    }
}

/// Formats `Last updated: 05 January 2024 at 14:03` in local time.
///
/// Returns `None` for timestamps outside chrono's range.
pub fn format_updated_at(epoch_ms: i64) -> Option<String> {
    format_updated_at_in(epoch_ms, &Local)
}

/// Same as [`format_updated_at`] in an explicit time zone.
pub fn format_updated_at_in<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp_millis(epoch_ms)?;
    let local = utc.with_timezone(tz);
    Some(format!(
        "Last updated: {} at {}",
        local.format("%d %B %Y"),
        local.format("%H:%M")
    ))
}

#[cfg(test)]
mod tests {
    use super::{format_updated_at_in, EditorState};
    use crate::model::note::Note;
    use chrono::Utc;

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note::with_id(id, "nb", title, content, 0)
    }

    #[test]
    fn edits_mark_dirty_and_reverting_clears() {
        let source = note("n1", "Title", "Body");
        let mut editor = EditorState::open(&source);
        assert!(!editor.has_changes());

        editor.set_content("Body!");
        assert!(editor.has_changes());

        editor.set_content("Body");
        assert!(!editor.has_changes());
    }

    #[test]
    fn save_returns_draft_and_clears_dirty_flag() {
        let mut editor = EditorState::open(&note("n1", "Title", "Body"));
        editor.set_title("New title");

        let saved = editor.save();
        assert_eq!(saved.title, "New title");
        assert_eq!(saved.content, "Body");
        assert!(!editor.has_changes());
    }

    #[test]
    fn switching_note_resets_draft() {
        let mut editor = EditorState::open(&note("n1", "One", "first"));
        editor.set_content("unsaved");

        editor.sync(&note("n2", "Two", "second"));
        assert_eq!(editor.note_id(), "n2");
        assert_eq!(editor.draft().content, "second");
        assert!(!editor.has_changes());
    }

    #[test]
    fn resync_same_note_keeps_draft() {
        let mut editor = EditorState::open(&note("n1", "One", "first"));
        editor.set_content("draft text");

        editor.sync(&note("n1", "One", "draft text"));
        assert_eq!(editor.draft().content, "draft text");
        assert!(!editor.has_changes());
    }

    #[test]
    fn external_edit_of_same_note_keeps_unsaved_draft() {
        let mut editor = EditorState::open(&note("n1", "One", "first"));
        editor.set_content("my draft");

        editor.sync(&note("n1", "One (renamed)", "changed elsewhere"));
        assert_eq!(editor.draft().content, "my draft");
        assert_eq!(editor.draft().title, "One");
        assert!(editor.has_changes());
    }

    #[test]
    fn updated_at_label_uses_day_month_year_and_24h_time() {
        // 2024-01-10T14:03:00Z
        let label = format_updated_at_in(1_704_895_380_000, &Utc).unwrap();
        assert_eq!(label, "Last updated: 10 January 2024 at 14:03");
    }
}
