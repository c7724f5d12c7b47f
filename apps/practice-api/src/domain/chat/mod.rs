//! Chat Bounded Context
//!
//! Turns of the assistant conversation. A message is either global or
//! scoped to one client, and listings never mix the two.

pub mod entity;
pub mod repository;

pub use entity::{ChatMessage, ChatRole, ChatScope, NewChatMessage};
pub use repository::ChatMessageRepository;
