//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::application::ports::TranscriptStatus;

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// JSON field name, or `body` when the problem is not tied to a field.
    pub field: String,
    /// What is wrong.
    pub message: String,
}

impl FieldIssue {
    /// Create a new issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error.
    pub error: String,
    /// Field-level detail for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldIssue>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Transcription result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed or placeholder text.
    pub transcription: String,
    /// `pending` for placeholders, `completed` for real transcripts.
    pub status: TranscriptStatus,
}

/// Body returned when an installer has not been built yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadMissingResponse {
    /// Short error.
    pub error: String,
    /// How to build the installer.
    pub message: String,
    /// Requested platform.
    pub platform: String,
    /// Installer file name.
    pub filename: String,
    /// Where the build writes the installer.
    pub build_path: String,
    /// Numbered build steps.
    pub instructions: Vec<String>,
}
