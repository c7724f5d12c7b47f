//! Generate Chat Reply Use Case

use std::sync::Arc;

use crate::application::ports::{AssistantError, AssistantPort, ChatReplyRequest};
use crate::domain::chat::{ChatMessage, ChatMessageRepository, ChatRole, ChatScope, NewChatMessage};
use crate::domain::shared::RepositoryError;

/// Both sides of an answered chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// The persisted user message.
    pub user_message: ChatMessage,
    /// The persisted assistant message.
    pub assistant_message: ChatMessage,
}

/// Chat reply failure.
#[derive(Debug, thiserror::Error)]
pub enum ChatReplyError {
    /// Storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The assistant failed. The user message is already persisted.
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

/// Use case answering a chat message within one scope.
///
/// The user message is stored first, then the most recent scoped history is
/// handed to the assistant and its reply is stored in the same scope.
pub struct GenerateChatReplyUseCase<R, A>
where
    R: ChatMessageRepository + ?Sized,
    A: AssistantPort + ?Sized,
{
    repo: Arc<R>,
    assistant: Arc<A>,
    history_limit: usize,
}

impl<R, A> GenerateChatReplyUseCase<R, A>
where
    R: ChatMessageRepository + ?Sized,
    A: AssistantPort + ?Sized,
{
    /// Create a new `GenerateChatReplyUseCase`.
    ///
    /// A `history_limit` of zero is raised to one so the assistant always sees
    /// the message it answers.
    pub fn new(repo: Arc<R>, assistant: Arc<A>, history_limit: usize) -> Self {
        Self {
            repo,
            assistant,
            history_limit: history_limit.max(1),
        }
    }

    /// Persist `message`, obtain a reply and persist it.
    pub async fn execute(
        &self,
        scope: ChatScope,
        message: String,
    ) -> Result<ChatReply, ChatReplyError> {
        let user_message = self
            .repo
            .create_chat_message(NewChatMessage {
                scope: scope.clone(),
                role: ChatRole::User,
                content: message,
            })
            .await?;

        let mut history = self.repo.list_chat_messages(&scope).await?;
        if history.len() > self.history_limit {
            history.drain(..history.len() - self.history_limit);
        }

        tracing::debug!(
            scope = scope.label(),
            history = history.len(),
            "Requesting assistant reply"
        );

        let reply = self
            .assistant
            .reply(ChatReplyRequest {
                scope: scope.clone(),
                history,
            })
            .await?;

        let assistant_message = self
            .repo
            .create_chat_message(NewChatMessage {
                scope,
                role: ChatRole::Assistant,
                content: reply,
            })
            .await?;

        Ok(ChatReply {
            user_message,
            assistant_message,
        })
    }
}
