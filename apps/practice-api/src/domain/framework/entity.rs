//! Framework and framework-file records.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{FrameworkFileId, FrameworkId, Timestamp};

/// A stored treatment framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    /// Record identifier.
    pub id: FrameworkId,
    /// Framework name, e.g. "CBT".
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Search tags.
    pub tags: Option<Vec<String>>,
    /// Note template associated with the framework.
    pub template_structure: Option<String>,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// Fields supplied when creating a framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFramework {
    /// Framework name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Search tags.
    pub tags: Option<Vec<String>>,
    /// Note template.
    pub template_structure: Option<String>,
}

/// Partial update for a framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkChanges {
    /// New name.
    pub name: Option<String>,
    /// New or cleared description.
    pub description: Option<Option<String>>,
    /// New or cleared tags.
    pub tags: Option<Option<Vec<String>>>,
    /// New or cleared template.
    pub template_structure: Option<Option<String>>,
}

impl Framework {
    /// Build a new record with a fresh id and creation time.
    #[must_use]
    pub fn create(new: NewFramework) -> Self {
        Self {
            id: FrameworkId::generate(),
            name: new.name,
            description: new.description,
            tags: new.tags,
            template_structure: new.template_structure,
            created_at: Timestamp::now(),
        }
    }

    /// Merge supplied fields over this record.
    pub fn apply(&mut self, changes: FrameworkChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(template_structure) = changes.template_structure {
            self.template_structure = template_structure;
        }
    }
}

/// A document attached to a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkFile {
    /// Record identifier.
    pub id: FrameworkFileId,
    /// Owning framework.
    pub framework_id: FrameworkId,
    /// Original file name.
    pub file_name: String,
    /// Where the file is stored.
    pub file_path: String,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// Fields supplied when attaching a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFrameworkFile {
    /// Owning framework.
    pub framework_id: FrameworkId,
    /// Original file name.
    pub file_name: String,
    /// Where the file is stored.
    pub file_path: String,
}

impl FrameworkFile {
    /// Build a new record with a fresh id and creation time.
    #[must_use]
    pub fn create(new: NewFrameworkFile) -> Self {
        Self {
            id: FrameworkFileId::generate(),
            framework_id: new.framework_id,
            file_name: new.file_name,
            file_path: new.file_path,
            created_at: Timestamp::now(),
        }
    }
}
