use std::borrow::Cow;

use crate::block::{Alignment, Block, ImageBlock, TextBlock};
use crate::document::Document;

use super::stylesheet::BASE_CSS;

/// Prefix of the class token derived from a block's role.
pub const ROLE_CLASS_PREFIX: &str = "block-role-";

/// Title used when a document has none.
pub const FALLBACK_TITLE: &str = "Document";

/// The parts of a document the renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct PageSource<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub blocks: &'a [Block],
}

impl<'a> From<&'a Document> for PageSource<'a> {
    fn from(doc: &'a Document) -> Self {
        PageSource {
            title: &doc.title,
            description: doc.description.as_deref(),
            blocks: &doc.blocks,
        }
    }
}

/// Escape a user-supplied value for text content or a quoted attribute.
///
/// Neutralizes `&`, `<`, `>`, `"` and `'`. Everything else, Hebrew included,
/// passes through unchanged.
pub fn escape(value: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(value)
}

/// Render a document to a standalone HTML page.
///
/// Pure and deterministic: the same document always yields the same bytes.
pub fn render(doc: &Document) -> String {
    render_page(PageSource::from(doc))
}

pub fn render_page(page: PageSource<'_>) -> String {
    let title = if page.title.is_empty() {
        FALLBACK_TITLE
    } else {
        page.title
    };
    let title = escape(title);

    let mut out = String::with_capacity(BASE_CSS.len() + 256 * (page.blocks.len() + 1));

    out.push_str("<!DOCTYPE html>");
    out.push_str("<html lang=\"en\">");
    out.push_str("<head>");
    out.push_str("<meta charset=\"utf-8\"/>");
    out.push_str(&format!("<title>{title}</title>"));
    out.push_str("<style>");
    out.push_str(BASE_CSS);
    out.push_str("</style>");
    out.push_str("</head>");
    out.push_str("<body>");

    out.push_str("<div class=\"page\">");
    out.push_str(&format!("<h1 class=\"page-header-title\">{title}</h1>"));
    if let Some(description) = page.description.filter(|d| !d.is_empty()) {
        out.push_str(&format!(
            "<p class=\"page-header-description\">{}</p>",
            escape(description)
        ));
    }

    for block in page.blocks {
        if let Some(fragment) = render_block(block) {
            out.push_str(&fragment);
        }
    }

    out.push_str("</div>");
    out.push_str("</body></html>");

    log::debug!(
        "rendered {} blocks into {} bytes",
        page.blocks.len(),
        out.len()
    );
    out
}

/// Markup for one block, or `None` when the block has nothing to show.
pub fn render_block(block: &Block) -> Option<String> {
    match block {
        Block::Text(b) => render_text(b),
        Block::Image(b) => render_image(b),
    }
}

pub fn role_class(role: &str) -> String {
    format!("{ROLE_CLASS_PREFIX}{}", escape(role))
}

fn alignment_class(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Left => Some("align-left"),
        Alignment::Right => Some("align-right"),
        Alignment::Inline | Alignment::Block => None,
    }
}

fn render_text(block: &TextBlock) -> Option<String> {
    if block.text.trim().is_empty() {
        return None;
    }

    Some(format!(
        "<div class=\"block block-text {}\"><p>{}</p></div>",
        role_class(&block.role),
        escape(&block.text)
    ))
}

fn render_image(block: &ImageBlock) -> Option<String> {
    if block.src.trim().is_empty() {
        return None;
    }

    let mut classes = format!("block block-image {}", role_class(&block.role));
    if let Some(align) = alignment_class(block.alignment) {
        classes.push(' ');
        classes.push_str(align);
    }

    let src = escape(&block.src);
    let alt = escape(block.alt_text.as_deref().unwrap_or(""));

    let mut out = format!("<figure class=\"{classes}\"><img src=\"{src}\" alt=\"{alt}\"/>");
    if !alt.is_empty() {
        out.push_str(&format!("<figcaption>{alt}</figcaption>"));
    }
    out.push_str("</figure>");
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup_once() {
        assert_eq!(escape("<b>&\"x\"</b>"), "&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;");
        assert_eq!(escape("&amp;"), "&amp;amp;");
        assert_eq!(escape("הא לחמא עניא"), "הא לחמא עניא");
    }

    #[test]
    fn inline_and_block_alignment_add_no_class() {
        assert_eq!(alignment_class(Alignment::Inline), None);
        assert_eq!(alignment_class(Alignment::Block), None);
        assert_eq!(alignment_class(Alignment::Left), Some("align-left"));
        assert_eq!(alignment_class(Alignment::Right), Some("align-right"));
    }

    #[test]
    fn whitespace_only_text_is_skipped() {
        assert_eq!(render_block(&Block::text("commentary_en", " \n\t ")), None);
    }
}
