use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::block::{blocks_from_values, Block};
use crate::types::validation::{FieldReader, Limit, ValidationError, Violations};

pub const NAME_LIMIT: Limit = Limit::required(200);
pub const TITLE_LIMIT: Limit = Limit::required(200);
pub const DESCRIPTION_LIMIT: Limit = Limit::at_most(1000);

/// Fields accepted when creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectDraft {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::object(value)?;
        let name = reader.required_str("name", NAME_LIMIT);
        let description = reader.optional_str("description", DESCRIPTION_LIMIT);
        reader.finish()?;

        Ok(ProjectDraft {
            name: name.to_string(),
            description: description.map(str::to_string),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check("name", &self.name, NAME_LIMIT);
        violations.check_optional("description", self.description.as_deref(), DESCRIPTION_LIMIT);
        violations.into_result()
    }
}

/// Full content of a document: used both to create one and to replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDraft {
    pub title: String,
    pub description: Option<String>,
    pub blocks: Vec<Block>,
}

impl DocumentDraft {
    pub fn new(title: impl Into<String>) -> Self {
        DocumentDraft {
            title: title.into(),
            description: None,
            blocks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Decode a request payload. `blocks` may be absent, meaning empty.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::object(value)?;
        let title = reader.required_str("title", TITLE_LIMIT);
        let description = reader.optional_str("description", DESCRIPTION_LIMIT);
        let records = reader.optional_array("blocks");

        let blocks = match blocks_from_values(records) {
            Ok(blocks) => blocks,
            Err(err) => {
                reader.violations().absorb(err);
                Vec::new()
            }
        };
        reader.finish()?;

        Ok(DocumentDraft {
            title: title.to_string(),
            description: description.map(str::to_string),
            blocks,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check("title", &self.title, TITLE_LIMIT);
        violations.check_optional("description", self.description.as_deref(), DESCRIPTION_LIMIT);
        for (index, block) in self.blocks.iter().enumerate() {
            if let Err(err) = block.validate() {
                violations.absorb(err.nested(&format!("blocks[{index}]")));
            }
        }
        violations.into_result()
    }
}

impl<'de> Deserialize<'de> for ProjectDraft {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ProjectDraft::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DocumentDraft {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        DocumentDraft::from_value(&value).map_err(serde::de::Error::custom)
    }
}
