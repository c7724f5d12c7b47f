//! Repository errors shared by every record type.
//!
//! Absence is never an error: lookups return `Ok(None)` and deletes return
//! `Ok(false)`. What remains are faults in the backing store.

use thiserror::Error;

/// Fault raised by a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned while accessing {store}")]
    LockPoisoned {
        /// Name of the store or table being accessed.
        store: String,
    },
}

impl RepositoryError {
    /// Create a lock-poisoned error for the named store.
    #[must_use]
    pub fn poisoned(store: impl Into<String>) -> Self {
        Self::LockPoisoned {
            store: store.into(),
        }
    }
}
