//! Draft Session Note Use Case

use std::sync::Arc;

use crate::application::ports::{AssistantError, AssistantPort, NoteDraftRequest};
use crate::domain::note::{NewNote, Note, NoteRepository};
use crate::domain::session::SessionRepository;
use crate::domain::shared::{RepositoryError, SessionId};

/// Note drafting failure.
#[derive(Debug, thiserror::Error)]
pub enum DraftNoteError {
    /// The session does not exist.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The assistant failed.
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

/// Use case drafting an assistant-generated note for a session.
pub struct DraftSessionNoteUseCase<R, A>
where
    R: SessionRepository + NoteRepository + ?Sized,
    A: AssistantPort + ?Sized,
{
    repo: Arc<R>,
    assistant: Arc<A>,
}

impl<R, A> DraftSessionNoteUseCase<R, A>
where
    R: SessionRepository + NoteRepository + ?Sized,
    A: AssistantPort + ?Sized,
{
    /// Create a new `DraftSessionNoteUseCase`.
    pub const fn new(repo: Arc<R>, assistant: Arc<A>) -> Self {
        Self { repo, assistant }
    }

    /// Draft and store a note for `session_id`.
    ///
    /// Without an explicit `transcription` the session's stored transcript is
    /// used.
    pub async fn execute(
        &self,
        session_id: SessionId,
        transcription: Option<String>,
    ) -> Result<Note, DraftNoteError> {
        let Some(session) = self.repo.get_session(&session_id).await? else {
            return Err(DraftNoteError::SessionNotFound(session_id));
        };

        let transcription = transcription.or_else(|| session.transcription.clone());
        let content = self
            .assistant
            .draft_note(NoteDraftRequest {
                session,
                transcription,
            })
            .await?;

        let note = self
            .repo
            .create_note(NewNote {
                session_id,
                content,
                is_ai_generated: Some(true),
            })
            .await?;

        tracing::info!(note_id = %note.id, session_id = %note.session_id, "Drafted session note");
        Ok(note)
    }
}
