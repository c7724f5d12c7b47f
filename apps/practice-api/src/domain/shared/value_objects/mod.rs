//! Shared Value Objects
//!
//! Immutable domain types used across every record type.
//! Value objects are compared by value, not identity.

mod identifiers;
mod timestamp;

pub use identifiers::{
    ChatMessageId, ClientId, FrameworkFileId, FrameworkId, NoteId, SessionId,
};
pub use timestamp::{Timestamp, TimestampParseError};
