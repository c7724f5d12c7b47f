//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API. Handlers live in [`super::handlers`]; this module owns
//! the shared state, the route table and the request metrics middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{MatchedPath, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::ports::{AssistantPort, TranscriptionPort};
use crate::config::DownloadsConfig;
use crate::domain::PracticeRepository;
use crate::observability::record_http_request;

use super::handlers::{assistant, chat, clients, downloads, frameworks, sessions};
use super::response::HealthResponse;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store.
    pub repo: Arc<dyn PracticeRepository>,
    /// Chat and note drafting backend.
    pub assistant: Arc<dyn AssistantPort>,
    /// Audio transcription backend.
    pub transcriber: Arc<dyn TranscriptionPort>,
    /// Metrics label of the assistant backend.
    pub assistant_provider: &'static str,
    /// Metrics label of the transcription backend.
    pub transcription_provider: &'static str,
    /// Turns of history sent with each chat request.
    pub history_limit: usize,
    /// Installer locations.
    pub downloads: Arc<DownloadsConfig>,
    /// Application version.
    pub version: String,
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Clients
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/api/clients/{id}",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/clients/{id}/sessions",
            get(clients::list_client_sessions),
        )
        // Sessions and notes
        .route(
            "/api/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/api/sessions/{id}",
            get(sessions::get_session).patch(sessions::update_session),
        )
        .route(
            "/api/sessions/{id}/notes",
            get(sessions::list_session_notes),
        )
        .route("/api/notes", post(sessions::create_note))
        .route(
            "/api/notes/{id}",
            get(sessions::get_note).patch(sessions::update_note),
        )
        // Frameworks
        .route(
            "/api/frameworks",
            get(frameworks::list_frameworks).post(frameworks::create_framework),
        )
        .route(
            "/api/frameworks/{id}",
            get(frameworks::get_framework)
                .patch(frameworks::update_framework)
                .delete(frameworks::delete_framework),
        )
        .route(
            "/api/frameworks/{id}/files",
            get(frameworks::list_framework_files).post(frameworks::create_framework_file),
        )
        // Chat
        .route(
            "/api/chat/messages",
            get(chat::list_messages).post(chat::create_message),
        )
        .route("/api/chat/messages/{id}", get(chat::get_message))
        .route("/api/chat/generate", post(chat::generate_reply))
        // Assistant seams
        .route("/api/transcribe", post(assistant::transcribe))
        .route("/api/generate-notes", post(assistant::generate_notes))
        // Installers
        .route(
            "/api/download/{platform}",
            get(downloads::download_installer),
        )
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Record latency and status for every matched route.
async fn track_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_owned(), |p| p.as_str().to_owned());

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    let status = response.status().as_u16();
    record_http_request(method.as_str(), &route, status, elapsed.as_secs_f64());
    tracing::info!(
        method = %method,
        route = %route,
        status,
        elapsed_ms = elapsed.as_millis() as u64,
        "Request handled"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AssistantError, MockAssistantPort, STUB_CLIENT_REPLY, STUB_GLOBAL_REPLY,
        STUB_NOTE_DRAFT, STUB_TRANSCRIPTION, StubAssistant, StubTranscriber,
    };
    use crate::infrastructure::persistence::InMemoryPracticeStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state_with(assistant: Arc<dyn AssistantPort>) -> (AppState, Arc<InMemoryPracticeStore>) {
        let store = Arc::new(InMemoryPracticeStore::new());
        let state = AppState {
            repo: store.clone(),
            assistant,
            transcriber: Arc::new(StubTranscriber),
            assistant_provider: "stub",
            transcription_provider: "stub",
            history_limit: 20,
            downloads: Arc::new(DownloadsConfig::default()),
            version: "test".to_string(),
        };
        (state, store)
    }

    fn app() -> (Router, Arc<InMemoryPracticeStore>) {
        let (state, store) = state_with(Arc::new(StubAssistant));
        (create_router(state), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = axum::http::Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_client(app: &Router, name: &str) -> String {
        let (status, body) = send(app, Method::POST, "/api/clients", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_session(app: &Router, client_id: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/sessions",
            Some(json!({
                "clientId": client_id,
                "date": "2026-01-05T10:00:00Z",
                "duration": 50,
                "sessionType": "individual"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "test");
    }

    #[tokio::test]
    async fn test_client_lifecycle() {
        let (app, _) = app();

        let (status, body) = send(&app, Method::GET, "/api/clients", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let id = create_client(&app, "Ada").await;

        let (status, body) = send(&app, Method::GET, &format!("/api/clients/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["status"], "active");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/clients/{id}"),
            Some(json!({ "email": "ada@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["name"], "Ada");

        let (status, body) = send(&app, Method::DELETE, &format!("/api/clients/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::GET, &format!("/api/clients/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Client not found" }));
    }

    #[tokio::test]
    async fn test_create_client_without_name_is_rejected() {
        let (app, store) = app();
        let (status, body) = send(&app, Method::POST, "/api/clients", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid client data");
        assert!(body["details"].is_array());
        assert_eq!(store.counts().unwrap().clients, 0);
    }

    #[tokio::test]
    async fn test_create_client_with_unknown_field_is_rejected() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/clients",
            Some(json!({ "name": "Ada", "ssn": "123" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid client data");
    }

    #[tokio::test]
    async fn test_update_unknown_client_is_not_found() {
        let (app, _) = app();
        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/clients/missing",
            Some(json!({ "name": "Nobody" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_framework_is_not_found() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::DELETE, "/api/frameworks/missing", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Framework not found");
    }

    #[tokio::test]
    async fn test_framework_file_requires_existing_framework() {
        let (app, _) = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/frameworks/missing/files",
            Some(json!({ "fileName": "cbt.pdf", "filePath": "/files/cbt.pdf" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_framework_files_round_trip() {
        let (app, _) = app();
        let (status, framework) = send(
            &app,
            Method::POST,
            "/api/frameworks",
            Some(json!({ "name": "CBT", "tags": ["anxiety"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = framework["id"].as_str().unwrap();

        let (status, file) = send(
            &app,
            Method::POST,
            &format!("/api/frameworks/{id}/files"),
            Some(json!({ "fileName": "cbt.pdf", "filePath": "/files/cbt.pdf" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(file["frameworkId"], id);

        let (status, files) = send(&app, Method::GET, &format!("/api/frameworks/{id}/files"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(files.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_client_sessions_and_session_notes() {
        let (app, _) = app();
        let client_id = create_client(&app, "Ada").await;
        let session_id = create_session(&app, &client_id).await;

        let (status, sessions) =
            send(&app, Method::GET, &format!("/api/clients/{client_id}/sessions"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sessions[0]["id"], session_id.as_str());
        assert_eq!(sessions[0]["status"], "pending");

        let (status, note) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "sessionId": session_id, "content": "Went well" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(note["isAiGenerated"], false);

        let (status, notes) =
            send(&app, Method::GET, &format!("/api/sessions/{session_id}/notes"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(notes.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_reply_for_client_scope() {
        let (app, _) = app();
        let (status, reply) = send(
            &app,
            Method::POST,
            "/api/chat/generate",
            Some(json!({ "message": "hello", "clientId": "X" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["role"], "assistant");
        assert_eq!(reply["content"], STUB_CLIENT_REPLY);
        assert_eq!(reply["clientId"], "X");

        let (_, scoped) = send(&app, Method::GET, "/api/chat/messages?clientId=X", None).await;
        assert_eq!(scoped.as_array().unwrap().len(), 2);
        assert_eq!(scoped[0]["role"], "user");
        assert_eq!(scoped[0]["content"], "hello");

        let (_, global) = send(&app, Method::GET, "/api/chat/messages", None).await;
        assert_eq!(global, json!([]));
    }

    #[tokio::test]
    async fn test_generate_reply_without_client_is_global() {
        let (app, _) = app();
        let (status, reply) = send(
            &app,
            Method::POST,
            "/api/chat/generate",
            Some(json!({ "message": "hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["content"], STUB_GLOBAL_REPLY);
        assert_eq!(reply["clientId"], Value::Null);
    }

    #[tokio::test]
    async fn test_generate_reply_rejects_oversized_message() {
        let (app, store) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat/generate",
            Some(json!({ "message": "x".repeat(5001) })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        assert_eq!(store.counts().unwrap().chat_messages, 0);
    }

    #[tokio::test]
    async fn test_generate_reply_assistant_failure_is_internal_error() {
        let mut assistant = MockAssistantPort::new();
        assistant.expect_reply().returning(|_| {
            Err(AssistantError::Connection {
                message: "refused".to_string(),
            })
        });
        let (state, store) = state_with(Arc::new(assistant));
        let app = create_router(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat/generate",
            Some(json!({ "message": "hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate response" }));
        // the user turn is kept
        assert_eq!(store.counts().unwrap().chat_messages, 1);
    }

    #[tokio::test]
    async fn test_store_chat_message_verbatim() {
        let (app, _) = app();
        let (status, message) = send(
            &app,
            Method::POST,
            "/api/chat/messages",
            Some(json!({ "role": "assistant", "content": "Imported" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = message["id"].as_str().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/api/chat/messages/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["content"], "Imported");
    }

    #[tokio::test]
    async fn test_transcribe_without_body_is_pending_placeholder() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::POST, "/api/transcribe", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transcription"], STUB_TRANSCRIPTION);
        assert_eq!(body["status"], "pending");
    }

    #[tokio::test]
    async fn test_generate_notes_stores_ai_note() {
        let (app, _) = app();
        let client_id = create_client(&app, "Ada").await;
        let session_id = create_session(&app, &client_id).await;

        let (status, note) = send(
            &app,
            Method::POST,
            "/api/generate-notes",
            Some(json!({ "sessionId": session_id })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(note["content"], STUB_NOTE_DRAFT);
        assert_eq!(note["isAiGenerated"], true);
        assert_eq!(note["sessionId"], session_id.as_str());
    }

    #[tokio::test]
    async fn test_generate_notes_for_unknown_session_is_not_found() {
        let (app, store) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/generate-notes",
            Some(json!({ "sessionId": "missing" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Session not found");
        assert_eq!(store.counts().unwrap().notes, 0);
    }

    #[tokio::test]
    async fn test_unknown_platform_is_rejected() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/download/solaris", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid platform. Use: windows, mac, or linux");
    }
}
