//! Chat message record, role and scope.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ChatMessageId, ClientId, Timestamp};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The practitioner.
    User,
    /// The assistant.
    Assistant,
}

impl ChatRole {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation partition a message belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChatScope {
    /// Messages with no client reference.
    #[default]
    Global,
    /// Messages about one client.
    Client(ClientId),
}

impl ChatScope {
    /// Scope for an optional client reference. Empty ids count as global.
    #[must_use]
    pub fn from_client_id(client_id: Option<ClientId>) -> Self {
        match client_id {
            Some(id) if !id.as_str().is_empty() => Self::Client(id),
            _ => Self::Global,
        }
    }

    /// The client reference stored on messages of this scope.
    #[must_use]
    pub fn client_id(&self) -> Option<&ClientId> {
        match self {
            Self::Global => None,
            Self::Client(id) => Some(id),
        }
    }

    /// Whether a message with the given client reference is in this scope.
    #[must_use]
    pub fn contains(&self, client_id: Option<&ClientId>) -> bool {
        self.client_id() == client_id
    }

    /// Label used in logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Client(_) => "client",
        }
    }
}

/// A stored chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Record identifier.
    pub id: ChatMessageId,
    /// Client the conversation is about; `null` for global.
    pub client_id: Option<ClientId>,
    /// Author of the turn.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
    /// When the message was stored.
    pub timestamp: Timestamp,
}

/// Fields supplied when storing a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    /// Conversation scope.
    pub scope: ChatScope,
    /// Author of the turn.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a new record with a fresh id and timestamp.
    #[must_use]
    pub fn create(new: NewChatMessage) -> Self {
        Self {
            id: ChatMessageId::generate(),
            client_id: new.scope.client_id().cloned(),
            role: new.role,
            content: new.content,
            timestamp: Timestamp::now(),
        }
    }

    /// Scope this message belongs to.
    #[must_use]
    pub fn scope(&self) -> ChatScope {
        ChatScope::from_client_id(self.client_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_scope_contains_only_null_references() {
        let scope = ChatScope::Global;
        assert!(scope.contains(None));
        assert!(!scope.contains(Some(&ClientId::new("c-1"))));
    }

    #[test]
    fn client_scope_contains_only_matching_reference() {
        let scope = ChatScope::Client(ClientId::new("c-1"));
        assert!(scope.contains(Some(&ClientId::new("c-1"))));
        assert!(!scope.contains(Some(&ClientId::new("c-2"))));
        assert!(!scope.contains(None));
    }

    #[test]
    fn empty_client_id_is_global() {
        assert_eq!(
            ChatScope::from_client_id(Some(ClientId::new(""))),
            ChatScope::Global
        );
    }

    #[test]
    fn create_copies_scope_onto_message() {
        let message = ChatMessage::create(NewChatMessage {
            scope: ChatScope::Client(ClientId::new("c-7")),
            role: ChatRole::User,
            content: "hello".to_string(),
        });

        assert_eq!(message.client_id, Some(ClientId::new("c-7")));
        assert_eq!(message.scope(), ChatScope::Client(ClientId::new("c-7")));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            r#""assistant""#
        );
    }
}
