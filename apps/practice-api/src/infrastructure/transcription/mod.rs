//! Speech-to-text adapters.

mod whisper;

pub use whisper::WhisperTranscriber;
