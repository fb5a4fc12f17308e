//! Persistence contract for projects and documents.
//!
//! The core never depends on a storage technology. Repositories are plain
//! values constructed by the caller; there is no process-wide store.

pub mod fs;
pub mod memory;

use thiserror::Error;

use crate::document::{Document, Project};
use crate::types::identifiers::{ContentVersion, DocumentId, ProjectId};
use crate::types::validation::ValidationError;

pub use fs::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Content version mismatch for {id}: recorded {recorded}, content hashes to {actual}")]
    Integrity {
        id: String,
        recorded: ContentVersion,
        actual: ContentVersion,
    },
    #[error("Stored document {id} is corrupt: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Load/save contract consumed by the studio.
///
/// Lists come back in creation order. `save_document` inserts a new document
/// or replaces an existing one wholesale.
pub trait Repository {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError>;

    fn list_documents(&self, project_id: ProjectId) -> Result<Vec<Document>, StoreError>;

    fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    fn save_document(&mut self, document: Document) -> Result<(), StoreError>;
}
