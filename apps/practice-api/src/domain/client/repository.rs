//! Client Repository Trait
//!
//! Persistence abstraction for client records, implemented by adapters in
//! the infrastructure layer.

use async_trait::async_trait;

use super::entity::{Client, ClientChanges, NewClient};
use crate::domain::shared::{ClientId, RepositoryError};

/// Repository trait for client persistence.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find a client by id. Absence is `Ok(None)`.
    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError>;

    /// List every client in creation order.
    async fn list_clients(&self) -> Result<Vec<Client>, RepositoryError>;

    /// Store a new client and return the stored record.
    async fn create_client(&self, new: NewClient) -> Result<Client, RepositoryError>;

    /// Merge changes into an existing client. `Ok(None)` if the id is unknown.
    async fn update_client(
        &self,
        id: &ClientId,
        changes: ClientChanges,
    ) -> Result<Option<Client>, RepositoryError>;

    /// Delete a client together with its sessions, their notes, and its chat
    /// messages. Returns `Ok(false)` if the id is unknown.
    async fn delete_client(&self, id: &ClientId) -> Result<bool, RepositoryError>;
}
