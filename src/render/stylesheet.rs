/// Stylesheet embedded in every exported page.
///
/// Static content versioned with the renderer. Role rules are keyed on the
/// `block-role-<role>` class token; figures on `block-image` plus the
/// `align-left` / `align-right` hints.
pub const BASE_CSS: &str = r#"
body {
    margin: 0;
    font-family: system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
    background-color: #f3f4f6;
    color: #111827;
}
.page {
    max-width: 800px;
    margin: 1.5rem auto;
    background-color: #ffffff;
    padding: 1.25rem 1.5rem;
    box-shadow: 0 0 0 1px #e5e7eb;
}
.page-header-title {
    margin: 0 0 0.25rem;
    font-size: 1.4rem;
    font-weight: 600;
}
.page-header-description {
    margin: 0 0 0.75rem;
    font-size: 0.95rem;
    color: #4b5563;
}
.block {
    margin-bottom: 0.75rem;
}
.block p {
    margin: 0;
}

/* Roles */

.block.block-role-haggadah_main_hebrew p {
    direction: rtl;
    text-align: right;
    font-size: 1.1rem;
    line-height: 1.7;
}

.block.block-role-haggadah_translation_en p {
    direction: ltr;
    text-align: left;
    font-size: 1rem;
    line-height: 1.6;
}

.block.block-role-commentary_en p {
    font-size: 0.95rem;
    line-height: 1.6;
    color: #374151;
}

.block.block-role-commentary_he p {
    direction: rtl;
    text-align: right;
    font-size: 0.95rem;
    line-height: 1.6;
}

.block.block-role-footnote_en p,
.block.block-role-footnote_he p {
    font-size: 0.8rem;
    line-height: 1.3;
    color: #4b5563;
}

.block.block-role-footnote_he p {
    direction: rtl;
    text-align: right;
}

.block.block-role-divrei_torah_callout {
    padding: 0.5rem 0.75rem;
    border-left: 3px solid #9ca3af;
    background-color: #f9fafb;
}

/* Figures */

.block-image {
    margin: 0.5rem 0 0.75rem;
    text-align: center;
}

.block-image img {
    max-width: 100%;
    height: auto;
}

.block-image figcaption {
    font-size: 0.8rem;
    color: #4b5563;
    margin-top: 0.25rem;
}

.block-image.align-left {
    float: left;
    max-width: 50%;
    margin-right: 1rem;
    text-align: left;
}

.block-image.align-right {
    float: right;
    max-width: 50%;
    margin-left: 1rem;
    text-align: right;
}
"#;
