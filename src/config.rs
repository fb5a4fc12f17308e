use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_STORE_ROOT: &str = "./torah_layout_store";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    pub version: String,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    Memory,
    Filesystem { root: PathBuf },
}

impl StudioConfig {
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            store: StoreConfig::Filesystem {
                root: PathBuf::from(DEFAULT_STORE_ROOT),
            },
        }
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_store_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.store = StoreConfig::Filesystem { root: root.into() };
        self
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self::v0()
    }
}
