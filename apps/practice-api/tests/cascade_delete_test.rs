//! Deletion semantics: clients cascade, frameworks do not.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, create, send};

#[tokio::test]
async fn test_deleting_client_removes_sessions_notes_and_chat() {
    let (app, store) = app();
    let ada = create(&app, "/api/clients", json!({ "name": "Ada" })).await;
    let bob = create(&app, "/api/clients", json!({ "name": "Bob" })).await;

    let session_body = |client: &str| {
        json!({
            "clientId": client,
            "date": "2026-03-02T09:00:00Z",
            "duration": 50,
            "sessionType": "individual"
        })
    };
    let ada_session = create(&app, "/api/sessions", session_body(&ada)).await;
    let bob_session = create(&app, "/api/sessions", session_body(&bob)).await;

    create(&app, "/api/notes", json!({ "sessionId": ada_session, "content": "A" })).await;
    create(&app, "/api/notes", json!({ "sessionId": bob_session, "content": "B" })).await;

    send(&app, Method::POST, "/api/chat/generate", Some(json!({ "message": "hi", "clientId": ada }))).await;
    send(&app, Method::POST, "/api/chat/generate", Some(json!({ "message": "hi", "clientId": bob }))).await;
    send(&app, Method::POST, "/api/chat/generate", Some(json!({ "message": "hi" }))).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/clients/{ada}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let counts = store.counts().unwrap();
    assert_eq!(counts.clients, 1);
    assert_eq!(counts.sessions, 1);
    assert_eq!(counts.notes, 1);
    // Bob's pair and the global pair remain
    assert_eq!(counts.chat_messages, 4);

    let (status, _) = send(&app, Method::GET, &format!("/api/sessions/{ada_session}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, ada_chat) = send(&app, Method::GET, &format!("/api/chat/messages?clientId={ada}"), None).await;
    assert_eq!(ada_chat, json!([]));

    let (_, bob_notes) =
        send(&app, Method::GET, &format!("/api/sessions/{bob_session}/notes"), None).await;
    assert_eq!(bob_notes.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_client_twice_is_not_found() {
    let (app, _) = app();
    let id = create(&app, "/api/clients", json!({ "name": "Ada" })).await;

    let (first, _) = send(&app, Method::DELETE, &format!("/api/clients/{id}"), None).await;
    let (second, body) = send(&app, Method::DELETE, &format!("/api/clients/{id}"), None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Client not found");
}

#[tokio::test]
async fn test_deleting_framework_keeps_its_files() {
    let (app, store) = app();
    let framework = create(&app, "/api/frameworks", json!({ "name": "DBT" })).await;
    create(
        &app,
        &format!("/api/frameworks/{framework}/files"),
        json!({ "fileName": "dbt.pdf", "filePath": "/files/dbt.pdf" }),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/frameworks/{framework}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(store.counts().unwrap().frameworks, 0);
    assert_eq!(store.counts().unwrap().framework_files, 1);

    let (status, files) =
        send(&app, Method::GET, &format!("/api/frameworks/{framework}/files"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(files.as_array().unwrap().len(), 1);
}
