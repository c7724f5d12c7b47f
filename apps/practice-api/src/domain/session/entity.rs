//! Session record and its create/update commands.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ClientId, SessionId, Timestamp};

/// Status given to a session when none is supplied.
pub const DEFAULT_SESSION_STATUS: &str = "pending";

/// A stored session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Record identifier.
    pub id: SessionId,
    /// Owning client.
    pub client_id: ClientId,
    /// When the session takes place.
    pub date: Timestamp,
    /// Length in minutes.
    pub duration: u32,
    /// Kind of session, e.g. "Individual Therapy".
    pub session_type: String,
    /// Workflow status, e.g. "pending" or "completed".
    pub status: String,
    /// Path of the recorded audio, if any.
    pub audio_file_path: Option<String>,
    /// Transcribed text of the recording, if any.
    pub transcription: Option<String>,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// Fields supplied when creating a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    /// Owning client.
    pub client_id: ClientId,
    /// When the session takes place.
    pub date: Timestamp,
    /// Length in minutes.
    pub duration: u32,
    /// Kind of session.
    pub session_type: String,
    /// Workflow status, [`DEFAULT_SESSION_STATUS`] when omitted.
    pub status: Option<String>,
    /// Path of the recorded audio.
    pub audio_file_path: Option<String>,
    /// Transcribed text.
    pub transcription: Option<String>,
}

/// Partial update for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionChanges {
    /// Reassign to another client.
    pub client_id: Option<ClientId>,
    /// New date.
    pub date: Option<Timestamp>,
    /// New duration.
    pub duration: Option<u32>,
    /// New session type.
    pub session_type: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New or cleared audio path.
    pub audio_file_path: Option<Option<String>>,
    /// New or cleared transcription.
    pub transcription: Option<Option<String>>,
}

impl Session {
    /// Build a new record with a fresh id, creation time and defaults applied.
    #[must_use]
    pub fn create(new: NewSession) -> Self {
        Self {
            id: SessionId::generate(),
            client_id: new.client_id,
            date: new.date,
            duration: new.duration,
            session_type: new.session_type,
            status: new
                .status
                .unwrap_or_else(|| DEFAULT_SESSION_STATUS.to_string()),
            audio_file_path: new.audio_file_path,
            transcription: new.transcription,
            created_at: Timestamp::now(),
        }
    }

    /// Merge supplied fields over this record.
    pub fn apply(&mut self, changes: SessionChanges) {
        if let Some(client_id) = changes.client_id {
            self.client_id = client_id;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(duration) = changes.duration {
            self.duration = duration;
        }
        if let Some(session_type) = changes.session_type {
            self.session_type = session_type;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(audio_file_path) = changes.audio_file_path {
            self.audio_file_path = audio_file_path;
        }
        if let Some(transcription) = changes.transcription {
            self.transcription = transcription;
        }
    }
}
