pub mod html;
pub mod stylesheet;

use serde_json::Value;

use crate::block::decode_blocks_lenient;
use crate::document::draft::{DESCRIPTION_LIMIT, TITLE_LIMIT};
use crate::types::validation::{FieldReader, ValidationError};

pub use html::{escape, render, render_block, render_page, role_class, PageSource, ROLE_CLASS_PREFIX};
pub use stylesheet::BASE_CSS;

/// Render an untyped document payload (`{title, description?, blocks}`).
///
/// Title and description are validated strictly. Blocks are decoded one by
/// one: a record that fails to decode, unknown `kind` included, is skipped
/// with a warning and the remaining blocks still render in order. This covers
/// known kinds too: a text or image record that breaks a field bound (an
/// `alt_text` over 300 characters, an empty `role`) is dropped, not truncated.
pub fn render_value(payload: &Value) -> Result<String, ValidationError> {
    let mut reader = FieldReader::object(payload)?;
    let title = reader.required_str("title", TITLE_LIMIT);
    let description = reader.optional_str("description", DESCRIPTION_LIMIT);
    let records = reader.optional_array("blocks");
    reader.finish()?;

    let decoded = decode_blocks_lenient(records);
    for rejected in &decoded.rejected {
        log::warn!("skipping block {}: {}", rejected.index, rejected.error);
    }

    Ok(render_page(PageSource {
        title,
        description,
        blocks: &decoded.blocks,
    }))
}
