use serde_json::json;
use torah_layout::block::Block;
use torah_layout::document::{Document, DocumentDraft, ProjectId};
use torah_layout::render::{render, render_value};

#[test]
fn lenient_unknown_kind_skipped_siblings_render() {
    let payload = json!({
        "title": "Maggid",
        "blocks": [
            { "kind": "text", "role": "haggadah_main_hebrew", "text": "הא לחמא עניא" },
            { "kind": "table", "role": "x", "rows": [] },
            { "kind": "text", "role": "commentary_en", "text": "after the table" },
        ],
    });

    let html = render_value(&payload).unwrap();

    assert!(html.contains("<p>הא לחמא עניא</p>"));
    assert!(html.contains("<p>after the table</p>"));
    assert!(!html.contains("block-role-x"));
    assert!(html.find("הא לחמא").unwrap() < html.find("after the table").unwrap());
}

#[test]
fn lenient_invalid_block_skipped() {
    let payload = json!({
        "title": "Figures",
        "blocks": [
            { "kind": "image", "role": "archaeology_fig" },
            "not an object",
            { "kind": "text", "role": "commentary_en", "text": "kept" },
        ],
    });

    let html = render_value(&payload).unwrap();
    assert!(!html.contains("<figure"));
    assert!(html.contains("<p>kept</p>"));
}

#[test]
fn lenient_out_of_bounds_known_kind_skipped() {
    let payload = json!({
        "title": "Figures",
        "blocks": [
            { "kind": "image", "role": "archaeology_fig", "src": "/img/oven.jpg", "alt_text": "a".repeat(301) },
            { "kind": "image", "role": "archaeology_fig", "src": "/img/kiln.jpg", "alt_text": "a".repeat(300) },
        ],
    });

    let html = render_value(&payload).unwrap();
    assert!(!html.contains("/img/oven.jpg"));
    assert!(html.contains("/img/kiln.jpg"));
}

#[test]
fn lenient_matches_typed_render_for_valid_payload() {
    let payload = json!({
        "title": "Maggid Export Test",
        "description": "Testing block render",
        "blocks": [
            { "kind": "text", "role": "commentary_en", "text": "one" },
            { "kind": "image", "role": "archaeology_fig", "src": "/a.jpg", "alt_text": "A", "alignment": "right" },
        ],
    });

    let draft = DocumentDraft::from_value(&payload).unwrap();
    let doc = Document::create(ProjectId::new(), draft).unwrap();

    assert_eq!(render_value(&payload).unwrap(), render(&doc));
}

#[test]
fn lenient_header_is_still_strict() {
    let err = render_value(&json!({ "blocks": [] })).unwrap_err();
    assert!(err.has_field("title"));

    let err = render_value(&json!({ "title": "x", "description": 5 })).unwrap_err();
    assert!(err.has_field("description"));

    assert!(render_value(&json!([Block::text("r", "t").to_value()])).is_err());
}
