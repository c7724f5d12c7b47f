//! Dependency Injection Container
//!
//! Selects the adapters named in [`Config`] and wires them into the HTTP
//! state.

use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{
    AssistantError, AssistantPort, StubAssistant, StubTranscriber, TranscriptionError,
    TranscriptionPort,
};
use crate::config::{AssistantProvider, Config, DownloadsConfig, TranscriptionProvider};
use crate::domain::PracticeRepository;
use crate::infrastructure::assistant::OllamaAssistant;
use crate::infrastructure::http::AppState;
use crate::infrastructure::persistence::InMemoryPracticeStore;
use crate::infrastructure::transcription::WhisperTranscriber;

/// Adapter construction failure.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The assistant client could not be built.
    #[error("assistant adapter: {0}")]
    Assistant(#[from] AssistantError),

    /// The transcription client could not be built.
    #[error("transcription adapter: {0}")]
    Transcription(#[from] TranscriptionError),
}

/// Dependency injection container.
///
/// Holds the store and the two capability adapters for the lifetime of the
/// process.
pub struct Container {
    repo: Arc<dyn PracticeRepository>,
    assistant: Arc<dyn AssistantPort>,
    transcriber: Arc<dyn TranscriptionPort>,
    assistant_provider: AssistantProvider,
    transcription_provider: TranscriptionProvider,
    history_limit: usize,
    downloads: Arc<DownloadsConfig>,
}

impl Container {
    /// Build every adapter from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ContainerError> {
        let assistant: Arc<dyn AssistantPort> = match config.assistant.provider {
            AssistantProvider::Stub => Arc::new(StubAssistant),
            AssistantProvider::Ollama => Arc::new(OllamaAssistant::new(&config.assistant)?),
        };

        let transcriber: Arc<dyn TranscriptionPort> = match config.transcription.provider {
            TranscriptionProvider::Stub => Arc::new(StubTranscriber),
            TranscriptionProvider::Whisper => {
                Arc::new(WhisperTranscriber::new(&config.transcription)?)
            }
        };

        tracing::info!(
            assistant = config.assistant.provider.as_str(),
            transcription = config.transcription.provider.as_str(),
            "Adapters selected"
        );

        Ok(Self {
            repo: Arc::new(InMemoryPracticeStore::new()),
            assistant,
            transcriber,
            assistant_provider: config.assistant.provider,
            transcription_provider: config.transcription.provider,
            history_limit: config.assistant.history_limit,
            downloads: Arc::new(config.downloads.clone()),
        })
    }

    /// Get the record store.
    pub fn repo(&self) -> Arc<dyn PracticeRepository> {
        Arc::clone(&self.repo)
    }

    /// Get the assistant port.
    pub fn assistant(&self) -> Arc<dyn AssistantPort> {
        Arc::clone(&self.assistant)
    }

    /// Get the transcription port.
    pub fn transcriber(&self) -> Arc<dyn TranscriptionPort> {
        Arc::clone(&self.transcriber)
    }

    /// Create the HTTP state.
    pub fn app_state(&self, version: impl Into<String>) -> AppState {
        AppState {
            repo: self.repo(),
            assistant: self.assistant(),
            transcriber: self.transcriber(),
            assistant_provider: self.assistant_provider.as_str(),
            transcription_provider: self.transcription_provider.as_str(),
            history_limit: self.history_limit,
            downloads: Arc::clone(&self.downloads),
            version: version.into(),
        }
    }
}
