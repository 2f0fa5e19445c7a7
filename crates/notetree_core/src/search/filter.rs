//! Case-insensitive substring search over notes.
//!
//! # Invariants
//! - Blank queries return no hits.
//! - Hits keep the input's relative order; there is no ranking.
//! - At most [`SEARCH_RESULT_LIMIT`] hits are returned.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum hits returned by [`search_notes`].
pub const SEARCH_RESULT_LIMIT: usize = 10;
const SNIPPET_CHARS: usize = 80;

static SNIPPET_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*\n]").expect("valid snippet regex"));

/// Filters `notes` whose `"{title} {content}"` contains `query`, ignoring case.
pub fn search_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            format!("{} {}", note.title, note.content)
                .to_lowercase()
                .contains(&needle)
        })
        .take(SEARCH_RESULT_LIMIT)
        .collect()
}

/// Result-list preview: markdown heading/emphasis marks and newlines become
/// spaces, first 80 characters kept, `...` appended.
pub fn result_snippet(content: &str) -> String {
    let flattened = SNIPPET_STRIP_RE.replace_all(content, " ");
    let mut snippet = flattened.chars().take(SNIPPET_CHARS).collect::<String>();
    snippet.push_str("...");
    snippet
}
