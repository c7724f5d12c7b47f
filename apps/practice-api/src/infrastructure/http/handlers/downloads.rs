//! Desktop installer downloads.

use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::config::Platform;

use super::super::controller::AppState;
use super::super::error::ApiError;
use super::super::response::DownloadMissingResponse;

/// `GET /api/download/{platform}`
///
/// Streams the installer as an attachment, or explains how to build it when
/// the file is missing.
pub async fn download_installer(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<Response, ApiError> {
    let Ok(platform) = platform.parse::<Platform>() else {
        return Err(ApiError::bad_request(
            "Invalid platform. Use: windows, mac, or linux",
        ));
    };

    let filename = state.downloads.installer_name(platform).to_string();
    let path = state.downloads.installer_path(platform);

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(missing_installer(&state, platform, filename, &path));
        }
        Err(e) => return Err(ApiError::internal("Failed to download installer", e)),
    };

    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::internal("Failed to download installer", e))?;
    if !metadata.is_file() {
        return Ok(missing_installer(&state, platform, filename, &path));
    }

    tracing::info!(%platform, path = %path.display(), bytes = metadata.len(), "Serving installer");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, metadata.len())
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| ApiError::internal("Failed to download installer", e))
}

fn missing_installer(
    state: &AppState,
    platform: Platform,
    filename: String,
    path: &std::path::Path,
) -> Response {
    let build_path = path.display().to_string();
    let build_command = &state.downloads.build_command;
    tracing::debug!(%platform, path = %build_path, "Installer not built");

    let body = DownloadMissingResponse {
        error: "Installer not yet built".to_string(),
        message: format!("To build the desktop installer, run: {build_command}"),
        platform: platform.to_string(),
        filename,
        instructions: vec![
            "1. Run 'npm run build' to build the web app".to_string(),
            format!("2. Run '{build_command}' to create the installer"),
            format!("3. The installer will be created at {build_path}"),
        ],
        build_path,
    };

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
