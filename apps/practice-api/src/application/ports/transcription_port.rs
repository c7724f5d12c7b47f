//! Transcription Port (Driven Port)
//!
//! Interface to the speech-to-text backend.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text returned by the stub transcriber.
pub const STUB_TRANSCRIPTION: &str = "Transcription placeholder - faster-whisper integration pending";

/// Transcription error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptionError {
    /// No audio file was supplied or recorded on the session.
    #[error("No audio file to transcribe")]
    MissingAudio,

    /// Audio file could not be read.
    #[error("Failed to read audio file {path}: {message}")]
    Io {
        /// Audio file path.
        path: String,
        /// Error detail.
        message: String,
    },

    /// Backend could not be reached.
    #[error("Transcription connection error: {message}")]
    Connection {
        /// Error detail.
        message: String,
    },

    /// Backend answered with a non-success status.
    #[error("Transcription backend returned status {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Backend answer could not be decoded.
    #[error("Transcription response invalid: {message}")]
    InvalidResponse {
        /// Error detail.
        message: String,
    },
}

/// State of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    /// Placeholder text; no audio was processed.
    Pending,
    /// Audio was transcribed.
    Completed,
}

impl TranscriptStatus {
    /// Wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TranscriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transcription result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Transcribed text.
    pub text: String,
    /// Whether real audio was processed.
    pub status: TranscriptStatus,
}

/// Audio to transcribe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionRequest {
    /// Path of the audio file on local disk.
    pub audio_path: Option<PathBuf>,
}

/// Port for speech-to-text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe the requested audio.
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<Transcript, TranscriptionError>;
}

/// Transcriber returning a pending placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTranscriber;

#[async_trait]
impl TranscriptionPort for StubTranscriber {
    async fn transcribe(
        &self,
        _request: TranscriptionRequest,
    ) -> Result<Transcript, TranscriptionError> {
        Ok(Transcript {
            text: STUB_TRANSCRIPTION.to_string(),
            status: TranscriptStatus::Pending,
        })
    }
}
