//! Note search entry points.
//!
//! # Responsibility
//! - Expose the literal substring filter used by the search dialog.
//! - Keep result shaping (snippets) inside core.

pub mod filter;
