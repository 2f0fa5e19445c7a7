//! Chat panel model with canned replies.
//!
//! # Responsibility
//! - Keep chat sessions, the active session and their message history.
//! - Produce templated replies from literal substring matches over notes.
//!
//! # Invariants
//! - At least one session always exists.
//! - A session is named after its first user message.
//! - Replies never leave the process; there is no model behind them.

use crate::model::generate_id;
use crate::model::note::Note;
use serde::{Deserialize, Serialize};

const INITIAL_GREETING: &str = "Hello! I can help you find information from your notes or answer questions based on your knowledge base. What would you like to know?";
const NEW_SESSION_GREETING: &str =
    "Hello! I'm ready to help you with your notes. What would you like to discuss?";
const DEFAULT_SESSION_NAME: &str = "New Chat";
const SESSION_NAME_CHARS: usize = 30;
const REPLY_EXCERPT_CHARS: usize = 200;
const REPLY_MAX_NOTES: usize = 2;

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Epoch ms.
    pub timestamp: i64,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: generate_id(),
            role,
            content: content.into(),
            timestamp: now_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ChatSession {
    fn with_greeting(greeting: &str, now_ms: i64) -> Self {
        Self {
            id: generate_id(),
            name: DEFAULT_SESSION_NAME.to_string(),
            messages: vec![ChatMessage::new(ChatRole::Assistant, greeting, now_ms)],
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    fn has_only_greeting(&self) -> bool {
        self.messages.len() == 1 && self.messages[0].role == ChatRole::Assistant
    }
}

/// All chat sessions of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPanel {
    sessions: Vec<ChatSession>,
    active_session_id: String,
}

impl ChatPanel {
    /// Creates a panel with one greeting session.
    pub fn new(now_ms: i64) -> Self {
        let session = ChatSession::with_greeting(INITIAL_GREETING, now_ms);
        Self {
            active_session_id: session.id.clone(),
            sessions: vec![session],
        }
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.sessions
            .iter()
            .find(|session| session.id == self.active_session_id)
    }

    /// Activates an existing session. Returns `false` for unknown ids.
    pub fn activate(&mut self, session_id: &str) -> bool {
        if self.sessions.iter().any(|session| session.id == session_id) {
            self.active_session_id = session_id.to_string();
            return true;
        }
        false
    }

    /// Appends a fresh session and activates it.
    pub fn create_session(&mut self, now_ms: i64) -> &ChatSession {
        let session = ChatSession::with_greeting(NEW_SESSION_GREETING, now_ms);
        self.active_session_id = session.id.clone();
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// Deletes one session. The last remaining session cannot be deleted.
    pub fn delete_session(&mut self, session_id: &str) -> bool {
        if self.sessions.len() <= 1 {
            return false;
        }
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != session_id);
        if self.sessions.len() == before {
            return false;
        }
        if self.active_session_id == session_id {
            self.active_session_id = self.sessions[0].id.clone();
        }
        true
    }

    /// Sends `input` to the active session and appends the canned reply.
    ///
    /// Returns the reply, or `None` when the input is blank.
    pub fn send(&mut self, input: &str, notes: &[Note], now_ms: i64) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        let active_id = self.active_session_id.clone();
        let session = self
            .sessions
            .iter_mut()
            .find(|session| session.id == active_id)?;

        if session.has_only_greeting() {
            session.name = session_name_from(input);
        }
        session
            .messages
            .push(ChatMessage::new(ChatRole::User, input, now_ms));
        session.messages.push(ChatMessage::new(
            ChatRole::Assistant,
            canned_reply(input, notes),
            now_ms,
        ));
        session.updated_at = now_ms;
        session.messages.last()
    }
}

fn session_name_from(input: &str) -> String {
    let mut name = input.chars().take(SESSION_NAME_CHARS).collect::<String>();
    if input.chars().count() > SESSION_NAME_CHARS {
        name.push_str("...");
    }
    name
}

/// Builds the templated reply for `query`.
pub fn canned_reply(query: &str, notes: &[Note]) -> String {
    let needle = query.to_lowercase();
    let relevant = notes
        .iter()
        .filter(|note| {
            note.content.to_lowercase().contains(&needle)
                || note.title.to_lowercase().contains(&needle)
        })
        .collect::<Vec<_>>();

    if relevant.is_empty() {
        return format!(
            "I couldn't find specific information about \"{query}\" in your notes. However, I can help you with general questions or suggest creating a new note about this topic. What would you like to do?"
        );
    }

    let excerpts = relevant
        .iter()
        .take(REPLY_MAX_NOTES)
        .map(|note| {
            let excerpt = note
                .content
                .chars()
                .take(REPLY_EXCERPT_CHARS)
                .collect::<String>();
            format!("**{}**: {excerpt}...", note.title)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Based on your notes, I found {} relevant note(s). Here's what I can tell you:\n\n{excerpts}\n\nWould you like me to elaborate on any specific aspect?",
        relevant.len()
    )
}

#[cfg(test)]
mod tests {
    use super::{canned_reply, ChatPanel, ChatRole};
    use crate::model::note::Note;

    fn notes() -> Vec<Note> {
        vec![
            Note::with_id("1", "nb", "Daily Journal", "Plan next sprint", 0),
            Note::with_id("2", "nb", "Sprint Review", "Went well", 0),
            Note::with_id("3", "nb", "Sprint Retro", "More tests", 0),
        ]
    }

    #[test]
    fn new_panel_has_one_greeting_session() {
        let panel = ChatPanel::new(0);
        let session = panel.active_session().unwrap();
        assert_eq!(panel.sessions().len(), 1);
        assert_eq!(session.name, "New Chat");
        assert_eq!(session.messages[0].role, ChatRole::Assistant);
    }

    #[test]
    fn first_message_names_session_and_later_ones_do_not() {
        let mut panel = ChatPanel::new(0);
        panel.send("What did I plan for the next sprint cycle?", &notes(), 1);
        let name = panel.active_session().unwrap().name.clone();
        assert_eq!(name, "What did I plan for the next s...");

        panel.send("another", &notes(), 2);
        assert_eq!(panel.active_session().unwrap().name, name);
        assert_eq!(panel.active_session().unwrap().messages.len(), 5);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut panel = ChatPanel::new(0);
        assert!(panel.send("   ", &notes(), 1).is_none());
        assert_eq!(panel.active_session().unwrap().messages.len(), 1);
    }

    #[test]
    fn reply_counts_all_matches_but_quotes_two() {
        let reply = canned_reply("SPRINT", &notes());
        assert!(reply.starts_with("Based on your notes, I found 3 relevant note(s)."));
        assert!(reply.contains("**Daily Journal**: Plan next sprint..."));
        assert!(reply.contains("**Sprint Review**"));
        assert!(!reply.contains("**Sprint Retro**"));
    }

    #[test]
    fn reply_without_matches_echoes_query() {
        let reply = canned_reply("kubernetes", &notes());
        assert!(reply.starts_with("I couldn't find specific information about \"kubernetes\""));
    }

    #[test]
    fn last_session_cannot_be_deleted() {
        let mut panel = ChatPanel::new(0);
        let first_id = panel.active_session().unwrap().id.clone();
        assert!(!panel.delete_session(&first_id));

        let second_id = panel.create_session(1).id.clone();
        assert_eq!(panel.active_session().unwrap().id, second_id);

        assert!(panel.delete_session(&second_id));
        assert_eq!(panel.active_session().unwrap().id, first_id);
    }
}
