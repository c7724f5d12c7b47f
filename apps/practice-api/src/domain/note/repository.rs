//! Note Repository Trait

use async_trait::async_trait;

use super::entity::{NewNote, Note, NoteChanges};
use crate::domain::shared::{NoteId, RepositoryError, SessionId};

/// Repository trait for note persistence.
///
/// Notes are never deleted individually; they go away with their client.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Find a note by id.
    async fn get_note(&self, id: &NoteId) -> Result<Option<Note>, RepositoryError>;

    /// List the notes of one session in creation order.
    async fn list_notes_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Note>, RepositoryError>;

    /// Store a new note.
    async fn create_note(&self, new: NewNote) -> Result<Note, RepositoryError>;

    /// Merge changes into an existing note.
    async fn update_note(
        &self,
        id: &NoteId,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError>;
}
