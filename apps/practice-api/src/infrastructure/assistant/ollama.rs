//! Ollama chat adapter.
//!
//! Calls `POST {base_url}/api/chat` with streaming disabled and reads
//! `message.content` from the response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AssistantError, AssistantPort, ChatReplyRequest, NoteDraftRequest};
use crate::config::AssistantConfig;
use crate::domain::chat::{ChatRole, ChatScope};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

impl OllamaMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: OllamaMessage,
}

/// Assistant backed by an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaAssistant {
    client: Client,
    chat_url: String,
    model: String,
    system_prompt: String,
}

impl OllamaAssistant {
    /// Create a new adapter from config.
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistantError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            chat_url: format!("{}/api/chat", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }

    async fn chat(&self, messages: Vec<OllamaMessage>) -> Result<String, AssistantError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(&self.chat_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Connection {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| AssistantError::InvalidResponse {
                    message: e.to_string(),
                })?;

        let content = parsed.message.content.trim().to_string();
        if content.is_empty() {
            return Err(AssistantError::InvalidResponse {
                message: "empty message content".to_string(),
            });
        }
        Ok(content)
    }

    fn scope_context(scope: &ChatScope) -> String {
        match scope {
            ChatScope::Client(id) => format!(
                "This conversation concerns a single client (id {id}). Keep advice specific to them."
            ),
            ChatScope::Global => {
                "This conversation spans the whole practice rather than one client.".to_string()
            }
        }
    }
}

#[async_trait]
impl AssistantPort for OllamaAssistant {
    async fn reply(&self, request: ChatReplyRequest) -> Result<String, AssistantError> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(OllamaMessage::new("system", self.system_prompt.as_str()));
        messages.push(OllamaMessage::new(
            "system",
            Self::scope_context(&request.scope),
        ));
        messages.extend(
            request
                .history
                .into_iter()
                .map(|m| OllamaMessage::new(m.role.as_str(), m.content)),
        );

        self.chat(messages).await
    }

    async fn draft_note(&self, request: NoteDraftRequest) -> Result<String, AssistantError> {
        let session = &request.session;
        let mut prompt = format!(
            "Write a concise clinical progress note for a {} minute {} session held on {}.",
            session.duration,
            session.session_type,
            session.date.as_datetime().format("%Y-%m-%d"),
        );
        match request.transcription.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                prompt.push_str("\n\nSession transcript:\n");
                prompt.push_str(text);
            }
            _ => prompt.push_str("\n\nNo transcript is available; produce a note template."),
        }

        self.chat(vec![
            OllamaMessage::new("system", self.system_prompt.as_str()),
            OllamaMessage::new(ChatRole::User.as_str(), prompt),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::{ChatMessage, NewChatMessage};
    use crate::domain::session::{NewSession, Session};
    use crate::domain::shared::{ClientId, Timestamp};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn assistant(server: &MockServer) -> OllamaAssistant {
        OllamaAssistant::new(&AssistantConfig {
            base_url: server.uri(),
            model: "test-model".to_string(),
            timeout_secs: 5,
            ..AssistantConfig::default()
        })
        .unwrap()
    }

    fn reply_body(content: &str) -> serde_json::Value {
        json!({
            "model": "test-model",
            "message": { "role": "assistant", "content": content },
            "done": true
        })
    }

    fn user_message(scope: ChatScope, content: &str) -> ChatMessage {
        ChatMessage::create(NewChatMessage {
            scope,
            role: ChatRole::User,
            content: content.to_string(),
        })
    }

    #[tokio::test]
    async fn reply_sends_history_and_reads_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "model": "test-model", "stream": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("  Try CBT.  ")))
            .expect(1)
            .mount(&server)
            .await;

        let scope = ChatScope::Client(ClientId::new("c-9"));
        let reply = assistant(&server)
            .reply(ChatReplyRequest {
                scope: scope.clone(),
                history: vec![user_message(scope, "What next?")],
            })
            .await
            .unwrap();

        assert_eq!(reply, "Try CBT.");

        let requests = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let messages = sent["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(messages[2]["content"], "What next?");
    }

    #[tokio::test]
    async fn upstream_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let err = assistant(&server)
            .reply(ChatReplyRequest {
                scope: ChatScope::Global,
                history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AssistantError::Upstream {
                status: 404,
                message: "model not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn empty_content_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("   ")))
            .mount(&server)
            .await;

        let err = assistant(&server)
            .reply(ChatReplyRequest {
                scope: ChatScope::Global,
                history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn draft_note_includes_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("S: ... O: ...")))
            .mount(&server)
            .await;

        let session = Session::create(NewSession {
            client_id: ClientId::new("c-1"),
            date: Timestamp::parse("2026-02-03").unwrap(),
            duration: 50,
            session_type: "Couples".to_string(),
            status: None,
            audio_file_path: None,
            transcription: None,
        });

        let note = assistant(&server)
            .draft_note(NoteDraftRequest {
                session,
                transcription: Some("We discussed sleep.".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(note, "S: ... O: ...");

        let requests = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = sent["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("2026-02-03"));
        assert!(prompt.contains("We discussed sleep."));
    }

    #[tokio::test]
    async fn unreachable_server_is_connection_error() {
        let server = MockServer::start().await;
        let adapter = assistant(&server);
        drop(server);

        let err = adapter
            .reply(ChatReplyRequest {
                scope: ChatScope::Global,
                history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::Connection { .. }));
    }
}
