//! Whisper-compatible transcription adapter.
//!
//! Uploads the audio file as multipart form data to
//! `POST {endpoint}/v1/audio/transcriptions` and reads `text`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::ports::{
    Transcript, TranscriptStatus, TranscriptionError, TranscriptionPort, TranscriptionRequest,
};
use crate::config::TranscriptionConfig;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcriber backed by a Whisper-compatible HTTP server.
#[derive(Debug, Clone)]
pub struct WhisperTranscriber {
    client: Client,
    url: String,
    model: String,
}

impl WhisperTranscriber {
    /// Create a new adapter from config.
    pub fn new(config: &TranscriptionConfig) -> Result<Self, TranscriptionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: format!(
                "{}/v1/audio/transcriptions",
                config.endpoint.trim_end_matches('/')
            ),
            model: config.model.clone(),
        })
    }

    async fn audio_part(path: &Path) -> Result<Part, TranscriptionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| TranscriptionError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let file_name = path
            .file_name()
            .map_or_else(|| "audio".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Part::bytes(bytes).file_name(file_name))
    }
}

#[async_trait]
impl TranscriptionPort for WhisperTranscriber {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<Transcript, TranscriptionError> {
        let Some(path) = request.audio_path else {
            return Err(TranscriptionError::MissingAudio);
        };

        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", Self::audio_part(&path).await?);

        tracing::debug!(path = %path.display(), model = %self.model, "Uploading audio for transcription");

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Connection {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TranscriptionResponse =
            response
                .json()
                .await
                .map_err(|e| TranscriptionError::InvalidResponse {
                    message: e.to_string(),
                })?;

        Ok(Transcript {
            text: parsed.text.trim().to_string(),
            status: TranscriptStatus::Completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transcriber(server: &MockServer) -> WhisperTranscriber {
        WhisperTranscriber::new(&TranscriptionConfig {
            endpoint: format!("{}/", server.uri()),
            model: "small".to_string(),
            timeout_secs: 5,
            ..TranscriptionConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn uploads_audio_and_reads_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "text": " Hello there. " })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("session.wav");
        std::fs::write(&audio, b"RIFF....WAVE").unwrap();

        let transcript = transcriber(&server)
            .transcribe(TranscriptionRequest {
                audio_path: Some(audio),
            })
            .await
            .unwrap();

        assert_eq!(transcript.text, "Hello there.");
        assert_eq!(transcript.status, TranscriptStatus::Completed);

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"model\""));
        assert!(body.contains("small"));
        assert!(body.contains("filename=\"session.wav\""));
    }

    #[tokio::test]
    async fn missing_path_is_rejected_before_upload() {
        let server = MockServer::start().await;

        let err = transcriber(&server)
            .transcribe(TranscriptionRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err, TranscriptionError::MissingAudio);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreadable_file_is_io_error() {
        let server = MockServer::start().await;

        let err = transcriber(&server)
            .transcribe(TranscriptionRequest {
                audio_path: Some(PathBuf::from("/nonexistent/audio.wav")),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::Io { .. }));
    }

    #[tokio::test]
    async fn server_error_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("a.mp3");
        std::fs::write(&audio, b"ID3").unwrap();

        let err = transcriber(&server)
            .transcribe(TranscriptionRequest {
                audio_path: Some(audio),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::Upstream { status: 500, .. }));
    }
}
