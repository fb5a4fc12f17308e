pub mod document;
pub mod draft;
pub mod project;

pub use crate::types::identifiers::{ContentVersion, DocumentId, ProjectId};
pub use document::Document;
pub use draft::{DocumentDraft, ProjectDraft};
pub use project::Project;
