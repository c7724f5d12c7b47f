//! Transcribe Audio Use Case

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{
    Transcript, TranscriptStatus, TranscriptionError, TranscriptionPort, TranscriptionRequest,
};
use crate::domain::session::{SessionChanges, SessionRepository};
use crate::domain::shared::{RepositoryError, SessionId};

/// Transcription failure.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    /// Storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The transcriber failed.
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}

/// Use case transcribing session audio.
pub struct TranscribeAudioUseCase<R, T>
where
    R: SessionRepository + ?Sized,
    T: TranscriptionPort + ?Sized,
{
    repo: Arc<R>,
    transcriber: Arc<T>,
}

impl<R, T> TranscribeAudioUseCase<R, T>
where
    R: SessionRepository + ?Sized,
    T: TranscriptionPort + ?Sized,
{
    /// Create a new `TranscribeAudioUseCase`.
    pub const fn new(repo: Arc<R>, transcriber: Arc<T>) -> Self {
        Self { repo, transcriber }
    }

    /// Transcribe `audio_path`, or the session's recorded audio when no path
    /// is given. A completed transcript is written back to the session.
    ///
    /// An unknown `session_id` is ignored.
    pub async fn execute(
        &self,
        session_id: Option<SessionId>,
        audio_path: Option<String>,
    ) -> Result<Transcript, TranscribeError> {
        let session = match session_id {
            Some(id) => {
                let session = self.repo.get_session(&id).await?;
                if session.is_none() {
                    tracing::debug!(session_id = %id, "Transcription requested for unknown session");
                }
                session
            }
            None => None,
        };

        let audio_path = audio_path
            .or_else(|| session.as_ref().and_then(|s| s.audio_file_path.clone()))
            .map(PathBuf::from);

        let transcript = self
            .transcriber
            .transcribe(TranscriptionRequest { audio_path })
            .await?;

        if transcript.status == TranscriptStatus::Completed
            && let Some(session) = session
        {
            self.repo
                .update_session(
                    &session.id,
                    SessionChanges {
                        transcription: Some(Some(transcript.text.clone())),
                        ..SessionChanges::default()
                    },
                )
                .await?;
            tracing::info!(session_id = %session.id, "Stored session transcription");
        }

        Ok(transcript)
    }
}
