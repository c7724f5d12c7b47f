//! Application Ports (Driven)
//!
//! Interfaces to the external capabilities the use cases depend on. Each port
//! ships with a stub implementation; real adapters live in infrastructure.

mod assistant_port;
mod transcription_port;

pub use assistant_port::{
    AssistantError, AssistantPort, ChatReplyRequest, NoteDraftRequest, STUB_CLIENT_REPLY,
    STUB_GLOBAL_REPLY, STUB_NOTE_DRAFT, StubAssistant,
};
#[cfg(test)]
pub use assistant_port::MockAssistantPort;
pub use transcription_port::{
    STUB_TRANSCRIPTION, StubTranscriber, Transcript, TranscriptStatus, TranscriptionError,
    TranscriptionPort, TranscriptionRequest,
};
#[cfg(test)]
pub use transcription_port::MockTranscriptionPort;
