//! Note record and its create/update commands.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{NoteId, SessionId, Timestamp};

/// A stored session note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Record identifier.
    pub id: NoteId,
    /// Session the note belongs to.
    pub session_id: SessionId,
    /// Note text.
    pub content: String,
    /// Whether the assistant drafted this note.
    pub is_ai_generated: bool,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// Fields supplied when creating a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    /// Session the note belongs to.
    pub session_id: SessionId,
    /// Note text.
    pub content: String,
    /// Origin flag, `false` when omitted.
    pub is_ai_generated: Option<bool>,
}

/// Partial update for a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    /// New text.
    pub content: Option<String>,
    /// New origin flag.
    pub is_ai_generated: Option<bool>,
}

impl Note {
    /// Build a new record with a fresh id and creation time.
    #[must_use]
    pub fn create(new: NewNote) -> Self {
        Self {
            id: NoteId::generate(),
            session_id: new.session_id,
            content: new.content,
            is_ai_generated: new.is_ai_generated.unwrap_or(false),
            created_at: Timestamp::now(),
        }
    }

    /// Merge supplied fields over this record.
    pub fn apply(&mut self, changes: NoteChanges) {
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(is_ai_generated) = changes.is_ai_generated {
            self.is_ai_generated = is_ai_generated;
        }
    }
}
