//! Session and note endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::note::{Note, NoteRepository};
use crate::domain::session::{Session, SessionRepository};
use crate::domain::shared::{NoteId, SessionId};
use crate::observability::record_created;

use super::super::controller::AppState;
use super::super::error::ApiError;
use super::super::request::{
    CreateNoteRequest, CreateSessionRequest, UpdateNoteRequest, UpdateSessionRequest,
    ValidatedJson,
};

/// `GET /api/sessions`
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let sessions = state
        .repo
        .list_sessions()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch sessions", e))?;
    Ok(Json(sessions))
}

/// `GET /api/sessions/{id}`
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Session>, ApiError> {
    state
        .repo
        .get_session(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch session", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session not found"))
}

/// `POST /api/sessions`
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let session = state
        .repo
        .create_session(request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to create session", e))?;

    record_created("session");
    tracing::info!(session_id = %session.id, client_id = %session.client_id, "Session created");
    Ok((StatusCode::CREATED, Json(session)))
}

/// `PATCH /api/sessions/{id}`
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    ValidatedJson(request): ValidatedJson<UpdateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    state
        .repo
        .update_session(&id, request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to update session", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session not found"))
}

/// `GET /api/sessions/{session_id}/notes`
pub async fn list_session_notes(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .repo
        .list_notes_by_session(&session_id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch notes", e))?;
    Ok(Json(notes))
}

/// `GET /api/notes/{id}`
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
) -> Result<Json<Note>, ApiError> {
    state
        .repo
        .get_note(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch note", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Note not found"))
}

/// `POST /api/notes`
pub async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state
        .repo
        .create_note(request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to create note", e))?;

    record_created("note");
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PATCH /api/notes/{id}`
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
    ValidatedJson(request): ValidatedJson<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    state
        .repo
        .update_note(&id, request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to update note", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Note not found"))
}
