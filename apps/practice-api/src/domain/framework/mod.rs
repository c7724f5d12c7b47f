//! Framework Bounded Context
//!
//! Reusable treatment-methodology templates and the documents attached to
//! them. Frameworks are independent of clients.
//!
//! Deleting a framework leaves its file records in place.

pub mod entity;
pub mod repository;

pub use entity::{Framework, FrameworkChanges, FrameworkFile, NewFramework, NewFrameworkFile};
pub use repository::{FrameworkFileRepository, FrameworkRepository};
