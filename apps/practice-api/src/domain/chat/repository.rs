//! Chat Message Repository Trait

use async_trait::async_trait;

use super::entity::{ChatMessage, ChatScope, NewChatMessage};
use crate::domain::shared::{ChatMessageId, RepositoryError};

/// Repository trait for chat history.
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Find a message by id.
    async fn get_chat_message(
        &self,
        id: &ChatMessageId,
    ) -> Result<Option<ChatMessage>, RepositoryError>;

    /// List the messages of one scope in creation order.
    ///
    /// [`ChatScope::Global`] selects messages without a client reference; it
    /// never returns everything.
    async fn list_chat_messages(
        &self,
        scope: &ChatScope,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// Store a new message.
    async fn create_chat_message(
        &self,
        new: NewChatMessage,
    ) -> Result<ChatMessage, RepositoryError>;
}
