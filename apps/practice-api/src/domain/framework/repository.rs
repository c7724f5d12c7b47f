//! Framework Repository Traits

use async_trait::async_trait;

use super::entity::{Framework, FrameworkChanges, FrameworkFile, NewFramework, NewFrameworkFile};
use crate::domain::shared::{FrameworkId, RepositoryError};

/// Repository trait for framework persistence.
#[async_trait]
pub trait FrameworkRepository: Send + Sync {
    /// Find a framework by id.
    async fn get_framework(&self, id: &FrameworkId) -> Result<Option<Framework>, RepositoryError>;

    /// List every framework in creation order.
    async fn list_frameworks(&self) -> Result<Vec<Framework>, RepositoryError>;

    /// Store a new framework.
    async fn create_framework(&self, new: NewFramework) -> Result<Framework, RepositoryError>;

    /// Merge changes into an existing framework.
    async fn update_framework(
        &self,
        id: &FrameworkId,
        changes: FrameworkChanges,
    ) -> Result<Option<Framework>, RepositoryError>;

    /// Delete the framework row only. Attached files are kept.
    async fn delete_framework(&self, id: &FrameworkId) -> Result<bool, RepositoryError>;
}

/// Repository trait for framework attachments.
#[async_trait]
pub trait FrameworkFileRepository: Send + Sync {
    /// List the files attached to one framework.
    async fn list_framework_files(
        &self,
        framework_id: &FrameworkId,
    ) -> Result<Vec<FrameworkFile>, RepositoryError>;

    /// Store a new file record.
    async fn create_framework_file(
        &self,
        new: NewFrameworkFile,
    ) -> Result<FrameworkFile, RepositoryError>;
}
