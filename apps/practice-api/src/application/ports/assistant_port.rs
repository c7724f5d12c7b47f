//! Assistant Port (Driven Port)
//!
//! Interface to the language model that answers chat messages and drafts
//! session notes.

use async_trait::async_trait;

use crate::domain::chat::{ChatMessage, ChatScope};
use crate::domain::session::Session;

/// Reply used by the stub assistant when a client is in scope.
pub const STUB_CLIENT_REPLY: &str = "Based on this client's session history, I would recommend a cognitive-behavioral approach focusing on thought pattern recognition.";

/// Reply used by the stub assistant in the global scope.
pub const STUB_GLOBAL_REPLY: &str = "Looking across all your clients, I can help you identify patterns and suggest treatment approaches.";

/// Note content drafted by the stub assistant.
pub const STUB_NOTE_DRAFT: &str = "AI-generated note placeholder - Ollama integration pending";

/// Assistant error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// Backend could not be reached.
    #[error("Assistant connection error: {message}")]
    Connection {
        /// Error detail.
        message: String,
    },

    /// Backend answered with a non-success status.
    #[error("Assistant returned status {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Backend answer could not be decoded.
    #[error("Assistant response invalid: {message}")]
    InvalidResponse {
        /// Error detail.
        message: String,
    },
}

/// A chat turn to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReplyRequest {
    /// Conversation scope.
    pub scope: ChatScope,
    /// Scoped history, oldest first, ending with the message being answered.
    pub history: Vec<ChatMessage>,
}

impl ChatReplyRequest {
    /// The message being answered.
    pub fn latest(&self) -> Option<&ChatMessage> {
        self.history.last()
    }
}

/// A session note to draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraftRequest {
    /// Session the note belongs to.
    pub session: Session,
    /// Transcript to summarise, if any.
    pub transcription: Option<String>,
}

/// Port for the assistant language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantPort: Send + Sync {
    /// Produce the assistant's reply to the latest message.
    async fn reply(&self, request: ChatReplyRequest) -> Result<String, AssistantError>;

    /// Draft note content for a session.
    async fn draft_note(&self, request: NoteDraftRequest) -> Result<String, AssistantError>;
}

/// Assistant returning fixed replies without calling a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubAssistant;

#[async_trait]
impl AssistantPort for StubAssistant {
    async fn reply(&self, request: ChatReplyRequest) -> Result<String, AssistantError> {
        let reply = match request.scope {
            ChatScope::Client(_) => STUB_CLIENT_REPLY,
            ChatScope::Global => STUB_GLOBAL_REPLY,
        };
        Ok(reply.to_string())
    }

    async fn draft_note(&self, _request: NoteDraftRequest) -> Result<String, AssistantError> {
        Ok(STUB_NOTE_DRAFT.to_string())
    }
}
