//! Framework endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::framework::{
    Framework, FrameworkFile, FrameworkFileRepository, FrameworkRepository,
};
use crate::domain::shared::FrameworkId;
use crate::observability::{record_created, record_deleted};

use super::super::controller::AppState;
use super::super::error::ApiError;
use super::super::request::{
    CreateFrameworkFileRequest, CreateFrameworkRequest, UpdateFrameworkRequest, ValidatedJson,
};

/// `GET /api/frameworks`
pub async fn list_frameworks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Framework>>, ApiError> {
    let frameworks = state
        .repo
        .list_frameworks()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch frameworks", e))?;
    Ok(Json(frameworks))
}

/// `GET /api/frameworks/{id}`
pub async fn get_framework(
    State(state): State<AppState>,
    Path(id): Path<FrameworkId>,
) -> Result<Json<Framework>, ApiError> {
    state
        .repo
        .get_framework(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch framework", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Framework not found"))
}

/// `POST /api/frameworks`
pub async fn create_framework(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateFrameworkRequest>,
) -> Result<(StatusCode, Json<Framework>), ApiError> {
    let framework = state
        .repo
        .create_framework(request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to create framework", e))?;

    record_created("framework");
    tracing::info!(framework_id = %framework.id, name = %framework.name, "Framework created");
    Ok((StatusCode::CREATED, Json(framework)))
}

/// `PATCH /api/frameworks/{id}`
pub async fn update_framework(
    State(state): State<AppState>,
    Path(id): Path<FrameworkId>,
    ValidatedJson(request): ValidatedJson<UpdateFrameworkRequest>,
) -> Result<Json<Framework>, ApiError> {
    state
        .repo
        .update_framework(&id, request.into())
        .await
        .map_err(|e| ApiError::internal("Failed to update framework", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Framework not found"))
}

/// `DELETE /api/frameworks/{id}`
///
/// Attached file records are left in place.
pub async fn delete_framework(
    State(state): State<AppState>,
    Path(id): Path<FrameworkId>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_framework(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete framework", e))?;

    if !deleted {
        return Err(ApiError::not_found("Framework not found"));
    }

    record_deleted("framework");
    tracing::info!(framework_id = %id, "Framework deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/frameworks/{id}/files`
pub async fn list_framework_files(
    State(state): State<AppState>,
    Path(id): Path<FrameworkId>,
) -> Result<Json<Vec<FrameworkFile>>, ApiError> {
    let files = state
        .repo
        .list_framework_files(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch framework files", e))?;
    Ok(Json(files))
}

/// `POST /api/frameworks/{id}/files`
pub async fn create_framework_file(
    State(state): State<AppState>,
    Path(id): Path<FrameworkId>,
    ValidatedJson(request): ValidatedJson<CreateFrameworkFileRequest>,
) -> Result<(StatusCode, Json<FrameworkFile>), ApiError> {
    let new_file = request.into_new_file(id.clone())?;

    let exists = state
        .repo
        .get_framework(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to create framework file", e))?
        .is_some();
    if !exists {
        return Err(ApiError::not_found("Framework not found"));
    }

    let file = state
        .repo
        .create_framework_file(new_file)
        .await
        .map_err(|e| ApiError::internal("Failed to create framework file", e))?;

    record_created("framework_file");
    Ok((StatusCode::CREATED, Json(file)))
}
