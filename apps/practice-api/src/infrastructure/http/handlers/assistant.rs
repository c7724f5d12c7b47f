//! Transcription and note drafting endpoints.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};

use crate::application::ports::TranscriptionError;
use crate::application::use_cases::{
    DraftNoteError, DraftSessionNoteUseCase, TranscribeAudioUseCase, TranscribeError,
};
use crate::domain::note::Note;
use crate::observability::{
    record_assistant_request, record_created, record_transcription_request,
};

use super::super::controller::AppState;
use super::super::error::ApiError;
use super::super::request::{GenerateNotesRequest, TranscribeRequest, ValidatedJson};
use super::super::response::TranscriptionResponse;

/// `POST /api/transcribe`
///
/// The body is optional. With the stub transcriber the response is always a
/// pending placeholder.
pub async fn transcribe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let request = TranscribeRequest::from_body(&body)?;
    let use_case =
        TranscribeAudioUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.transcriber));

    match use_case
        .execute(request.session_id, request.audio_file_path)
        .await
    {
        Ok(transcript) => {
            record_transcription_request(state.transcription_provider, "ok");
            Ok(Json(TranscriptionResponse {
                transcription: transcript.text,
                status: transcript.status,
            }))
        }
        Err(TranscribeError::Transcription(TranscriptionError::MissingAudio)) => {
            Err(ApiError::bad_request("No audio file to transcribe"))
        }
        Err(TranscribeError::Transcription(e @ TranscriptionError::Io { .. })) => {
            tracing::warn!(error = %e, "Audio file unreadable");
            Err(ApiError::bad_request("Audio file could not be read"))
        }
        Err(TranscribeError::Transcription(e)) => {
            record_transcription_request(state.transcription_provider, "error");
            Err(ApiError::internal("Transcription failed", e))
        }
        Err(TranscribeError::Repository(e)) => Err(ApiError::internal("Transcription failed", e)),
    }
}

/// `POST /api/generate-notes`
///
/// Drafts and stores an assistant-generated note for the session.
pub async fn generate_notes(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateNotesRequest>,
) -> Result<Json<Note>, ApiError> {
    let use_case =
        DraftSessionNoteUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.assistant));

    match use_case
        .execute(request.session_id, request.transcription)
        .await
    {
        Ok(note) => {
            record_assistant_request(state.assistant_provider, "ok");
            record_created("note");
            Ok(Json(note))
        }
        Err(DraftNoteError::SessionNotFound(_)) => Err(ApiError::not_found("Session not found")),
        Err(DraftNoteError::Assistant(e)) => {
            record_assistant_request(state.assistant_provider, "error");
            Err(ApiError::internal("Note generation failed", e))
        }
        Err(DraftNoteError::Repository(e)) => Err(ApiError::internal("Note generation failed", e)),
    }
}
