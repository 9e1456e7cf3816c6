//! In-memory session state and the messages sent through it.
//!
//! A session is transient: it exists only in process memory, keyed by
//! user id, and is lost on reset or restart even though the turn log in
//! the database survives. The accumulated history is replayed to the
//! upstream API on every call, since `generateContent` is stateless.

use serde::{Deserialize, Serialize};

/// Fixed configuration applied to every new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Upstream model identifier.
    pub model: String,
    /// Cap on generated tokens per reply.
    pub max_output_tokens: u32,
    /// System instruction tuned to suppress extraneous formatting.
    pub system_instruction: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            max_output_tokens: 400,
            system_instruction: "You are an extremely concise, professional assistant. \
                For general, non-code questions, respond using only clean, standard \
                markdown paragraphs and lists. STRICTLY avoid generating JSON, Python \
                list structures, or any complex, unnecessary formatting. ONLY use code \
                blocks (```language ... ```) when the user explicitly asks for code."
                .to_string(),
        }
    }
}

/// Which side produced a history entry, in the upstream API's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRole {
    User,
    Model,
}

/// One accumulated message inside a session.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub text: String,
}

/// An inline binary attachment accompanying a user message.
#[derive(Debug, Clone)]
pub struct InlineAttachment {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// A user message on its way to the provider: text plus an optional
/// inline attachment.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub text: String,
    pub attachment: Option<InlineAttachment>,
}

impl OutboundMessage {
    /// A plain-text message with no attachment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }
}

/// Per-user conversational state held by the registry.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub settings: SessionSettings,
    pub history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            history: Vec::new(),
        }
    }

    /// Commit a completed exchange to the session history.
    ///
    /// Called only after a successful provider call, so failed attempts
    /// and retries never duplicate entries.
    pub fn push_exchange(&mut self, query: &str, reply: &str) {
        self.history.push(HistoryEntry {
            role: HistoryRole::User,
            text: query.to_string(),
        });
        self.history.push(HistoryEntry {
            role: HistoryRole::Model,
            text: reply.to_string(),
        });
    }
}
