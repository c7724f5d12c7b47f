//! Speech-to-text configuration.

use serde::{Deserialize, Serialize};

/// Which transcriber to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    /// Pending placeholder.
    #[default]
    Stub,
    /// Whisper-compatible HTTP server.
    Whisper,
}

impl TranscriptionProvider {
    /// Label used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Whisper => "whisper",
        }
    }
}

/// Transcription configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Implementation to use.
    #[serde(default)]
    pub provider: TranscriptionProvider,
    /// Base URL of the Whisper-compatible server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name sent with each request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            provider: TranscriptionProvider::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_model() -> String {
    "base".to_string()
}

const fn default_timeout_secs() -> u64 {
    600
}
