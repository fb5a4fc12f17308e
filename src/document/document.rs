use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::draft::DocumentDraft;
use crate::block::{blocks_to_values, Block};
use crate::types::identifiers::{ContentVersion, DocumentId, ProjectId};
use crate::types::validation::ValidationError;

/// A titled, ordered sequence of blocks belonging to one project.
///
/// Block order is significant: it is insertion order, storage order and
/// render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub blocks: Vec<Block>,
    pub created_at: DateTime<Utc>, // informational only
    pub updated_at: DateTime<Utc>, // informational only
}

impl Document {
    /// Validate a draft and create a document under `project_id`.
    ///
    /// The caller is responsible for checking that the project exists; the
    /// document only records the reference.
    pub fn create(project_id: ProjectId, draft: DocumentDraft) -> Result<Self, ValidationError> {
        draft.validate()?;

        let now = Utc::now();
        Ok(Document {
            id: DocumentId::new(),
            project_id,
            title: draft.title,
            description: draft.description,
            blocks: draft.blocks,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite title, description and the whole block list.
    ///
    /// Nothing changes unless the draft validates.
    pub fn replace(&mut self, draft: DocumentDraft) -> Result<(), ValidationError> {
        draft.validate()?;

        self.title = draft.title;
        self.description = draft.description;
        self.blocks = draft.blocks;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Hash of title, description and blocks. Ids and timestamps are excluded,
    /// so two documents with the same content share a version.
    pub fn content_version(&self) -> ContentVersion {
        content_version(&self.title, self.description.as_deref(), &self.blocks)
    }
}

pub(crate) fn content_version(
    title: &str,
    description: Option<&str>,
    blocks: &[Block],
) -> ContentVersion {
    // serde_json maps are key-sorted, which makes this encoding canonical.
    let canonical = serde_json::json!({
        "title": title,
        "description": description,
        "blocks": Value::Array(blocks_to_values(blocks)),
    });
    ContentVersion::from_content(canonical.to_string().as_bytes())
}
