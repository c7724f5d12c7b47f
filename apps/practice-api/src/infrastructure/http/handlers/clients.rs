//! Client endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::client::{Client, ClientRepository};
use crate::domain::session::{Session, SessionRepository};
use crate::domain::shared::ClientId;
use crate::observability::{record_created, record_deleted};

use super::super::controller::AppState;
use super::super::error::ApiError;
use super::super::request::{CreateClientRequest, UpdateClientRequest, ValidatedJson};

/// `GET /api/clients`
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = state
        .repo
        .list_clients()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch clients", e))?;
    Ok(Json(clients))
}

/// `GET /api/clients/{id}`
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, ApiError> {
    state
        .repo
        .get_client(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch client", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client not found"))
}

/// `POST /api/clients`
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state
        .repo
        .create_client(request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to create client", e))?;

    record_created("client");
    tracing::info!(client_id = %client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// `PATCH /api/clients/{id}`
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
    ValidatedJson(request): ValidatedJson<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    state
        .repo
        .update_client(&id, request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to update client", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client not found"))
}

/// `DELETE /api/clients/{id}`
///
/// Removes the client's sessions, their notes and the client's chat history.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_client(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete client", e))?;

    if !deleted {
        return Err(ApiError::not_found("Client not found"));
    }

    record_deleted("client");
    tracing::info!(client_id = %id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/clients/{client_id}/sessions`
pub async fn list_client_sessions(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let sessions = state
        .repo
        .list_sessions_by_client(&client_id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch sessions", e))?;
    Ok(Json(sessions))
}
