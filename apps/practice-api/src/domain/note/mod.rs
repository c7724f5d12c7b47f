//! Note Bounded Context
//!
//! Free-text annotations attached to a session, written by the practitioner
//! or drafted by the assistant.

pub mod entity;
pub mod repository;

pub use entity::{NewNote, Note, NoteChanges};
pub use repository::NoteRepository;
