//! Client Bounded Context
//!
//! A client is a practice's customer record. Clients own sessions (and,
//! through them, notes) and client-scoped chat messages; deleting a client
//! removes all of them.

pub mod entity;
pub mod repository;

pub use entity::{Client, ClientChanges, ClientStatus, NewClient};
pub use repository::ClientRepository;
