use crate::document::{Document, Project};
use crate::types::identifiers::{DocumentId, ProjectId};

use super::{Repository, StoreError};

/// Insertion-ordered, in-process repository. Each instance is isolated.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: Vec<Project>,
    documents: Vec<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.projects.clone())
    }

    fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        if self.projects.iter().any(|p| p.id == project.id) {
            return Err(StoreError::DuplicateId(project.id.to_string()));
        }
        self.projects.push(project);
        Ok(())
    }

    fn list_documents(&self, project_id: ProjectId) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .documents
            .iter()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect())
    }

    fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.iter().find(|d| d.id == id).cloned())
    }

    fn save_document(&mut self, document: Document) -> Result<(), StoreError> {
        match self.documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => self.documents.push(document),
        }
        Ok(())
    }
}
