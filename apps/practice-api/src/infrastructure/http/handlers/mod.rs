//! Route handlers, one module per resource.

pub mod assistant;
pub mod chat;
pub mod clients;
pub mod downloads;
pub mod frameworks;
pub mod sessions;
