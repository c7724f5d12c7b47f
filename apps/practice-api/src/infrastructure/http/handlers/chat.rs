//! Chat history and assistant reply endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::application::use_cases::{ChatReplyError, GenerateChatReplyUseCase};
use crate::domain::chat::{ChatMessage, ChatMessageRepository};
use crate::domain::shared::ChatMessageId;
use crate::observability::{record_assistant_request, record_created};

use super::super::controller::AppState;
use super::super::error::ApiError;
use super::super::request::{
    ChatMessagesQuery, CreateChatMessageRequest, GenerateChatRequest, ValidatedJson,
    ValidatedQuery,
};

/// `GET /api/chat/messages?clientId=`
///
/// Without `clientId` only global messages are returned.
pub async fn list_messages(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ChatMessagesQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = state
        .repo
        .list_chat_messages(&query.scope())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch messages", e))?;
    Ok(Json(messages))
}

/// `GET /api/chat/messages/{id}`
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<ChatMessageId>,
) -> Result<Json<ChatMessage>, ApiError> {
    state
        .repo
        .get_chat_message(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch message", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Message not found"))
}

/// `POST /api/chat/messages`
///
/// Stores the message as given; no reply is generated.
pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateChatMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let message = state
        .repo
        .create_chat_message(request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to create message", e))?;

    record_created("chat_message");
    Ok((StatusCode::CREATED, Json(message)))
}

/// `POST /api/chat/generate`
///
/// Returns the stored assistant message.
pub async fn generate_reply(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateChatRequest>,
) -> Result<Json<ChatMessage>, ApiError> {
    let scope = request.scope();
    let use_case = GenerateChatReplyUseCase::new(
        Arc::clone(&state.repo),
        Arc::clone(&state.assistant),
        state.history_limit,
    );

    match use_case.execute(scope, request.message).await {
        Ok(reply) => {
            record_assistant_request(state.assistant_provider, "ok");
            // user turn and assistant turn
            record_created("chat_message");
            record_created("chat_message");
            tracing::info!(
                message_id = %reply.assistant_message.id,
                scope = reply.assistant_message.scope().label(),
                "Assistant reply stored"
            );
            Ok(Json(reply.assistant_message))
        }
        Err(ChatReplyError::Assistant(e)) => {
            record_assistant_request(state.assistant_provider, "error");
            Err(ApiError::internal("Failed to generate response", e))
        }
        Err(ChatReplyError::Repository(e)) => {
            Err(ApiError::internal("Failed to generate response", e))
        }
    }
}
