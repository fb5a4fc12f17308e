use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, DocumentDraft, Project, ProjectDraft};
use crate::render;
use crate::store::{Repository, StoreError};
use crate::types::identifiers::{ContentVersion, DocumentId, ProjectId};
use crate::types::validation::ValidationError;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Project not found")]
    ProjectNotFound(ProjectId),
    #[error("Document not found")]
    DocumentNotFound(DocumentId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A rendered page together with the content version it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlExport {
    pub document_id: DocumentId,
    pub version: ContentVersion,
    pub html: String,
}

/// Project and document operations over an injected repository.
///
/// Transport-agnostic: an HTTP layer or the CLI maps its requests onto these
/// calls. Writes either apply completely or not at all.
pub struct Studio<R> {
    repo: R,
}

impl<R: Repository> Studio<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, StudioError> {
        Ok(self.repo.list_projects()?)
    }

    pub fn create_project(&mut self, draft: ProjectDraft) -> Result<Project, StudioError> {
        let project = Project::create(draft)?;
        self.repo.insert_project(project.clone())?;
        log::info!("created project {} ({})", project.id, project.name);
        Ok(project)
    }

    pub fn get_project(&self, id: ProjectId) -> Result<Project, StudioError> {
        self.repo
            .get_project(id)?
            .ok_or(StudioError::ProjectNotFound(id))
    }

    pub fn list_documents(&self, project_id: ProjectId) -> Result<Vec<Document>, StudioError> {
        self.get_project(project_id)?;
        Ok(self.repo.list_documents(project_id)?)
    }

    /// Create a document under an existing project.
    pub fn create_document(
        &mut self,
        project_id: ProjectId,
        draft: DocumentDraft,
    ) -> Result<Document, StudioError> {
        self.get_project(project_id)?;
        let document = Document::create(project_id, draft)?;
        self.repo.save_document(document.clone())?;
        log::info!(
            "created document {} in project {} ({} blocks)",
            document.id,
            project_id,
            document.blocks.len()
        );
        Ok(document)
    }

    /// Fetch a document. A document that exists under another project is
    /// reported as not found.
    pub fn get_document(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
    ) -> Result<Document, StudioError> {
        self.get_project(project_id)?;
        self.repo
            .get_document(document_id)?
            .filter(|d| d.project_id == project_id)
            .ok_or(StudioError::DocumentNotFound(document_id))
    }

    /// Replace title, description and all blocks of a document.
    pub fn update_document(
        &mut self,
        project_id: ProjectId,
        document_id: DocumentId,
        draft: DocumentDraft,
    ) -> Result<Document, StudioError> {
        let mut document = self.get_document(project_id, document_id)?;
        document.replace(draft)?;
        self.repo.save_document(document.clone())?;
        log::info!(
            "replaced document {} ({} blocks)",
            document.id,
            document.blocks.len()
        );
        Ok(document)
    }

    pub fn export_html(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
    ) -> Result<HtmlExport, StudioError> {
        let document = self.get_document(project_id, document_id)?;
        Ok(HtmlExport {
            document_id: document.id,
            version: document.content_version(),
            html: render::render(&document),
        })
    }
}
