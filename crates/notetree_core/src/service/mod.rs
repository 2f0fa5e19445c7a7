//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate the notebook API and note store behind one controller.
//! - Keep editor drafts and chat sessions out of the tree state.

pub mod chat_service;
pub mod editor;
pub mod workspace_service;
