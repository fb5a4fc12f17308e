use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::ProjectDraft;
use crate::types::identifiers::ProjectId;
use crate::types::validation::ValidationError;

/// Top-level container owning zero or more documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>, // informational only
}

impl Project {
    /// Validate a draft and assign a fresh id.
    pub fn create(draft: ProjectDraft) -> Result<Self, ValidationError> {
        draft.validate()?;

        Ok(Project {
            id: ProjectId::new(),
            name: draft.name,
            description: draft.description,
            created_at: Utc::now(),
        })
    }
}
