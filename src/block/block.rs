use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::validation::{Limit, ValidationError, Violation, Violations};

pub const ROLE_LIMIT: Limit = Limit::required(100);
pub const TEXT_LIMIT: Limit = Limit::non_empty();
pub const SRC_LIMIT: Limit = Limit::non_empty();
pub const ALT_TEXT_LIMIT: Limit = Limit::at_most(300);

/// Discriminator values accepted for the `kind` field.
pub const BLOCK_KINDS: &[&str] = &["text", "image"];

/// One content unit of a document.
///
/// The `kind` discriminator is the serde tag, so it can never disagree with
/// the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub role: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageBlock {
    pub role: String,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub alignment: Alignment,
}

/// Placement hint for a figure within the linear flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Inline,
    Left,
    Right,
    #[default]
    Block,
}

impl Alignment {
    pub const ALL: &'static [&'static str] = &["inline", "left", "right", "block"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Inline => "inline",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Block => "block",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inline" => Some(Alignment::Inline),
            "left" => Some(Alignment::Left),
            "right" => Some(Alignment::Right),
            "block" => Some(Alignment::Block),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Block {
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Block::Text(TextBlock {
            role: role.into(),
            text: text.into(),
        })
    }

    pub fn image(role: impl Into<String>, src: impl Into<String>) -> Self {
        Block::Image(ImageBlock {
            role: role.into(),
            src: src.into(),
            alt_text: None,
            alignment: Alignment::default(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Image(_) => "image",
        }
    }

    pub fn role(&self) -> &str {
        match self {
            Block::Text(b) => &b.role,
            Block::Image(b) => &b.role,
        }
    }

    /// Check field bounds of an already typed block.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check("role", self.role(), ROLE_LIMIT);
        match self {
            Block::Text(b) => violations.check("text", &b.text, TEXT_LIMIT),
            Block::Image(b) => {
                violations.check("src", &b.src, SRC_LIMIT);
                violations.check_optional("alt_text", b.alt_text.as_deref(), ALT_TEXT_LIMIT);
            }
        }
        violations.into_result()
    }

    /// Plain field mapping, suitable for an opaque JSON column or a response body.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("kind".into(), Value::from(self.kind()));
        map.insert("role".into(), Value::from(self.role()));
        match self {
            Block::Text(b) => {
                map.insert("text".into(), Value::from(b.text.as_str()));
            }
            Block::Image(b) => {
                map.insert("src".into(), Value::from(b.src.as_str()));
                if let Some(alt) = &b.alt_text {
                    map.insert("alt_text".into(), Value::from(alt.as_str()));
                }
                map.insert("alignment".into(), Value::from(b.alignment.as_str()));
            }
        }
        Value::Object(map)
    }
}

impl TextBlock {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        TextBlock {
            role: role.into(),
            text: text.into(),
        }
    }
}

impl ImageBlock {
    pub fn new(role: impl Into<String>, src: impl Into<String>) -> Self {
        ImageBlock {
            role: role.into(),
            src: src.into(),
            alt_text: None,
            alignment: Alignment::default(),
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl From<TextBlock> for Block {
    fn from(b: TextBlock) -> Self {
        Block::Text(b)
    }
}

impl From<ImageBlock> for Block {
    fn from(b: ImageBlock) -> Self {
        Block::Image(b)
    }
}

// Deserialization goes through the strict decoder so every bad field is
// reported, not only the first one serde trips over.
impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        super::decode::decode_block_strict(&value).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn unknown_kind(value: &str) -> Violation {
    Violation::UnknownValue {
        value: value.to_string(),
        allowed: BLOCK_KINDS,
    }
}
