//! Session Bounded Context
//!
//! One recorded counselling appointment. Every session belongs to a client.

pub mod entity;
pub mod repository;

pub use entity::{DEFAULT_SESSION_STATUS, NewSession, Session, SessionChanges};
pub use repository::SessionRepository;
