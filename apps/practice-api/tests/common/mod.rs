//! Shared helpers for the HTTP integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use practice_api::config::DownloadsConfig;
use practice_api::infrastructure::http::{AppState, create_router};
use practice_api::{InMemoryPracticeStore, StubAssistant, StubTranscriber};

/// Router over a fresh store with stub adapters.
pub fn app_with_downloads(downloads: DownloadsConfig) -> (Router, Arc<InMemoryPracticeStore>) {
    let store = Arc::new(InMemoryPracticeStore::new());
    let state = AppState {
        repo: store.clone(),
        assistant: Arc::new(StubAssistant),
        transcriber: Arc::new(StubTranscriber),
        assistant_provider: "stub",
        transcription_provider: "stub",
        history_limit: 20,
        downloads: Arc::new(downloads),
        version: "integration".to_string(),
    };
    (create_router(state), store)
}

pub fn app() -> (Router, Arc<InMemoryPracticeStore>) {
    app_with_downloads(DownloadsConfig::default())
}

/// Send a request and decode the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
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
    if bytes.is_empty() {
        (status, Value::Null)
    } else {
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

/// POST and return the new record's id.
pub async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, created) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {created}");
    created["id"].as_str().unwrap().to_string()
}
