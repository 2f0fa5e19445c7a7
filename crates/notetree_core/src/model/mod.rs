//! Domain model for the notebook browser.
//!
//! # Responsibility
//! - Define canonical notebook/note records used by core business logic.
//! - Provide the in-memory tree that owns both lists.
//!
//! # Invariants
//! - Every record is identified by a stable string id.
//! - Timestamps are Unix epoch milliseconds.

pub mod note;
pub mod notebook;
pub mod tree;

/// Returns the current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generates a fresh record id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
