use serde_json::Value;
use thiserror::Error;

use super::block::{
    unknown_kind, Alignment, Block, ImageBlock, TextBlock, ALT_TEXT_LIMIT, ROLE_LIMIT,
    SRC_LIMIT, TEXT_LIMIT,
};
use crate::types::validation::{FieldReader, Limit, ValidationError, Violation, Violations};

/// A record whose `kind` names no known block variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported block kind `{kind}`")]
pub struct UnsupportedBlockError {
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockDecodeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedBlockError),
}

impl From<BlockDecodeError> for ValidationError {
    fn from(err: BlockDecodeError) -> Self {
        match err {
            BlockDecodeError::Invalid(e) => e,
            BlockDecodeError::Unsupported(e) => {
                ValidationError::single("kind", unknown_kind(&e.kind))
            }
        }
    }
}

/// Decode one untyped block record.
///
/// An unknown `kind` is reported as `Unsupported` so callers can decide
/// whether to reject it or isolate it.
pub fn decode_block(value: &Value) -> Result<Block, BlockDecodeError> {
    let mut reader = FieldReader::object(value)?;
    let kind = reader.required_str("kind", Limit::non_empty());
    let role = reader.required_str("role", ROLE_LIMIT);

    let block = match kind {
        "text" => {
            let text = reader.required_str("text", TEXT_LIMIT);
            Block::Text(TextBlock::new(role, text))
        }
        "image" => {
            let src = reader.required_str("src", SRC_LIMIT);
            let alt_text = reader.optional_str("alt_text", ALT_TEXT_LIMIT);
            let alignment = read_alignment(&mut reader);
            Block::Image(ImageBlock {
                role: role.to_string(),
                src: src.to_string(),
                alt_text: alt_text.map(str::to_string),
                alignment,
            })
        }
        // Missing or mistyped kind already recorded by the reader.
        "" => return Err(reader.finish().err().map_or_else(missing_kind, Into::into)),
        other => {
            return Err(UnsupportedBlockError {
                kind: other.to_string(),
            }
            .into())
        }
    };

    reader.finish()?;
    Ok(block)
}

fn missing_kind() -> BlockDecodeError {
    ValidationError::single("kind", Violation::Empty).into()
}

fn read_alignment(reader: &mut FieldReader<'_>) -> Alignment {
    match reader.optional_str("alignment", Limit::unbounded()) {
        None => Alignment::default(),
        Some(raw) => Alignment::parse(raw).unwrap_or_else(|| {
            reader.violations().push(
                "alignment",
                Violation::UnknownValue {
                    value: raw.to_string(),
                    allowed: Alignment::ALL,
                },
            );
            Alignment::default()
        }),
    }
}

/// Decode one record, treating an unknown `kind` as a schema violation.
pub fn decode_block_strict(value: &Value) -> Result<Block, ValidationError> {
    decode_block(value).map_err(Into::into)
}

/// Typed blocks to plain field mappings, order preserved.
pub fn blocks_to_values(blocks: &[Block]) -> Vec<Value> {
    blocks.iter().map(Block::to_value).collect()
}

/// Plain field mappings to typed blocks. All-or-nothing: any bad record fails
/// the whole sequence, with field paths rooted at `blocks[i]`.
pub fn blocks_from_values(values: &[Value]) -> Result<Vec<Block>, ValidationError> {
    let mut blocks = Vec::with_capacity(values.len());
    let mut violations = Violations::default();

    for (index, value) in values.iter().enumerate() {
        match decode_block_strict(value) {
            Ok(block) => blocks.push(block),
            Err(err) => violations.absorb(err.nested(&format!("blocks[{index}]"))),
        }
    }

    violations.into_result()?;
    debug_assert_eq!(blocks.len(), values.len());
    Ok(blocks)
}

/// A record the lenient decoder set aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedBlock {
    pub index: usize,
    pub error: BlockDecodeError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LenientBlocks {
    pub blocks: Vec<Block>,
    pub rejected: Vec<RejectedBlock>,
}

/// Decode each record on its own. Records that fail are collected in
/// `rejected` with their original index; the rest keep their relative order.
pub fn decode_blocks_lenient(values: &[Value]) -> LenientBlocks {
    let mut out = LenientBlocks::default();
    for (index, value) in values.iter().enumerate() {
        match decode_block(value) {
            Ok(block) => out.blocks.push(block),
            Err(error) => out.rejected.push(RejectedBlock { index, error }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::block::BLOCK_KINDS;
    use serde_json::json;

    #[test]
    fn kinds_constant_matches_decoder() {
        for kind in BLOCK_KINDS {
            let err = decode_block(&json!({ "kind": kind })).unwrap_err();
            assert!(matches!(err, BlockDecodeError::Invalid(_)), "{kind}");
        }
    }

    #[test]
    fn missing_kind_is_invalid_not_unsupported() {
        let err = decode_block(&json!({ "role": "x", "text": "y" })).unwrap_err();
        match err {
            BlockDecodeError::Invalid(e) => assert!(e.has_field("kind")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn wrong_type_kind_is_invalid() {
        let err = decode_block(&json!({ "kind": 3, "role": "x" })).unwrap_err();
        match err {
            BlockDecodeError::Invalid(e) => assert!(e.has_field("kind")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
