//! Session Repository Trait

use async_trait::async_trait;

use super::entity::{NewSession, Session, SessionChanges};
use crate::domain::shared::{ClientId, RepositoryError, SessionId};

/// Repository trait for session persistence.
///
/// The store does not check that `client_id` refers to an existing client;
/// callers supply valid foreign keys.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by id.
    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;

    /// List every session in creation order.
    async fn list_sessions(&self) -> Result<Vec<Session>, RepositoryError>;

    /// List the sessions belonging to one client.
    async fn list_sessions_by_client(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Session>, RepositoryError>;

    /// Store a new session.
    async fn create_session(&self, new: NewSession) -> Result<Session, RepositoryError>;

    /// Merge changes into an existing session.
    async fn update_session(
        &self,
        id: &SessionId,
        changes: SessionChanges,
    ) -> Result<Option<Session>, RepositoryError>;
}
