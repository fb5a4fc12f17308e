use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::{blocks_from_values, blocks_to_values};
use crate::document::document::content_version;
use crate::document::{Document, Project};
use crate::types::identifiers::{ContentVersion, DocumentId, ProjectId};

use super::{Repository, StoreError};

const PROJECTS_DIR: &str = "projects";
const DOCUMENTS_DIR: &str = "documents";

/// Directory-backed repository.
///
/// Layout:
/// - `projects/<id>.json`
/// - `documents/<project_id>/<id>.json`, blocks kept as an opaque JSON array
///   next to the content version they hashed to when written
///
/// Every write lands in a temp file that is synced and renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// On-disk shape of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    id: DocumentId,
    project_id: ProjectId,
    version: ContentVersion,
    title: String,
    description: Option<String>,
    blocks: Vec<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredDocument {
    fn from_document(doc: &Document) -> Self {
        StoredDocument {
            id: doc.id,
            project_id: doc.project_id,
            version: doc.content_version(),
            title: doc.title.clone(),
            description: doc.description.clone(),
            blocks: blocks_to_values(&doc.blocks),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }

    fn into_document(self) -> Result<Document, StoreError> {
        let blocks = blocks_from_values(&self.blocks).map_err(|source| StoreError::Corrupt {
            id: self.id.to_string(),
            source,
        })?;

        // Verify version matches what was recorded (recompute from content)
        let actual = content_version(&self.title, self.description.as_deref(), &blocks);
        if actual != self.version {
            return Err(StoreError::Integrity {
                id: self.id.to_string(),
                recorded: self.version,
                actual,
            });
        }

        Ok(Document {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            blocks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory layout if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(PROJECTS_DIR))?;
        fs::create_dir_all(root.join(DOCUMENTS_DIR))?;
        log::debug!("opened file store at {}", root.display());
        Ok(FileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_path(&self, id: ProjectId) -> PathBuf {
        self.root.join(PROJECTS_DIR).join(format!("{id}.json"))
    }

    fn project_documents_dir(&self, project_id: ProjectId) -> PathBuf {
        self.root.join(DOCUMENTS_DIR).join(project_id.to_string())
    }

    fn document_path(&self, project_id: ProjectId, id: DocumentId) -> PathBuf {
        self.project_documents_dir(project_id).join(format!("{id}.json"))
    }

    /// Documents are filed under their project, so a lookup by id probes
    /// each project directory.
    fn find_document_path(&self, id: DocumentId) -> Result<Option<PathBuf>, StoreError> {
        let file_name = format!("{id}.json");
        for entry in fs::read_dir(self.root.join(DOCUMENTS_DIR))? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let path = entry.path().join(&file_name);
            if path.is_file() {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    fn read_all<T: DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>, StoreError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut out = Vec::new();
        for entry in entries {
            let path = entry?.path();
            // Leftover temp files from an interrupted write are not records.
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(record) = read_json(&path)? {
                out.push(record);
            }
        }
        Ok(out)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let f = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_reader(f)?))
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let temp = path.with_extension("json.tmp");
    let f = fs::File::create(&temp)?;
    serde_json::to_writer_pretty(&f, value)?;
    f.sync_all()?;
    fs::rename(&temp, path)?;
    Ok(())
}

impl Repository for FileStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.read_all(&self.root.join(PROJECTS_DIR))?;
        projects.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        read_json(&self.project_path(id))
    }

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        let path = self.project_path(project.id);
        if path.exists() {
            return Err(StoreError::DuplicateId(project.id.to_string()));
        }
        write_json_atomic(&path, &project)?;
        log::debug!("stored project {}", project.id);
        Ok(())
    }

    fn list_documents(&self, project_id: ProjectId) -> Result<Vec<Document>, StoreError> {
        let stored: Vec<StoredDocument> = self.read_all(&self.project_documents_dir(project_id))?;
        let mut docs = stored
            .into_iter()
            .map(StoredDocument::into_document)
            .collect::<Result<Vec<_>, _>>()?;
        docs.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(docs)
    }

    fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let Some(path) = self.find_document_path(id)? else {
            return Ok(None);
        };
        read_json::<StoredDocument>(&path)?
            .map(StoredDocument::into_document)
            .transpose()
    }

    fn save_document(&mut self, document: Document) -> Result<(), StoreError> {
        let stored = StoredDocument::from_document(&document);
        fs::create_dir_all(self.project_documents_dir(document.project_id))?;
        write_json_atomic(&self.document_path(document.project_id, document.id), &stored)?;
        log::debug!(
            "stored document {} ({} blocks, {})",
            document.id,
            document.blocks.len(),
            stored.version
        );
        Ok(())
    }
}
