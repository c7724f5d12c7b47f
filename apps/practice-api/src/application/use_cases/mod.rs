//! Application Use Cases
//!
//! Orchestration of repositories and capability ports.

mod draft_session_note;
mod generate_chat_reply;
mod transcribe_audio;

pub use draft_session_note::{DraftNoteError, DraftSessionNoteUseCase};
pub use generate_chat_reply::{ChatReply, ChatReplyError, GenerateChatReplyUseCase};
pub use transcribe_audio::{TranscribeAudioUseCase, TranscribeError};
