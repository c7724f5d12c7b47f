//! Domain Layer
//!
//! The innermost layer: practice records, their create/update commands and
//! the repository traits the infrastructure layer implements.
//!
//! # Bounded Contexts
//!
//! - [`client`]: Client records (cascade-delete root)
//! - [`session`]: Counselling sessions belonging to a client
//! - [`note`]: Session notes, practitioner-written or assistant-drafted
//! - [`framework`]: Treatment frameworks and attached files
//! - [`chat`]: Assistant conversation history, global or client-scoped

pub mod chat;
pub mod client;
pub mod framework;
pub mod note;
pub mod session;
pub mod shared;

/// Every repository the application needs, implemented by one store.
pub trait PracticeRepository:
    client::ClientRepository
    + session::SessionRepository
    + note::NoteRepository
    + framework::FrameworkRepository
    + framework::FrameworkFileRepository
    + chat::ChatMessageRepository
{
}

impl<T> PracticeRepository for T where
    T: client::ClientRepository
        + session::SessionRepository
        + note::NoteRepository
        + framework::FrameworkRepository
        + framework::FrameworkFileRepository
        + chat::ChatMessageRepository
{
}
