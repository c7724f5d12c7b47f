//! Shared Domain Types
//!
//! Value objects and errors shared across record types.

pub mod errors;
pub mod value_objects;

pub use errors::RepositoryError;
pub use value_objects::{
    ChatMessageId, ClientId, FrameworkFileId, FrameworkId, NoteId, SessionId, Timestamp,
    TimestampParseError,
};
