use serde_json::json;
use tempfile::tempdir;
use torah_layout::block::Block;
use torah_layout::document::{DocumentDraft, DocumentId, ProjectDraft, ProjectId};
use torah_layout::store::{FileStore, MemoryStore};
use torah_layout::studio::{Studio, StudioError};

fn studio() -> Studio<MemoryStore> {
    Studio::new(MemoryStore::new())
}

fn sample_project(studio: &mut Studio<MemoryStore>) -> ProjectId {
    studio
        .create_project(
            ProjectDraft::new("Haggadah Yeshuas Nissan").with_description("Main Haggadah project"),
        )
        .unwrap()
        .id
}

fn export_payload() -> DocumentDraft {
    DocumentDraft::from_value(&json!({
        "title": "Maggid Export Test",
        "description": "Testing block render",
        "blocks": [
            {
                "kind": "text",
                "role": "haggadah_main_hebrew",
                "text": "הא לחמא עניא די אכלו אבהתנא בארעא דמצרים...",
            },
            {
                "kind": "text",
                "role": "commentary_en",
                "text": "This section introduces the theme of spiritual poverty.",
            },
            {
                "kind": "image",
                "role": "archaeology_fig",
                "src": "/images/matzah_oven_01.jpg",
                "alt_text": "Ancient matzah oven.",
                "alignment": "block",
            },
        ],
    }))
    .unwrap()
}

#[test]
fn projects_initially_empty() {
    assert!(studio().list_projects().unwrap().is_empty());
}

#[test]
fn create_project_and_list_it() {
    let mut studio = studio();
    let project = studio
        .create_project(ProjectDraft::new("Haggadah Yeshuas Nissan").with_description("Main Haggadah project"))
        .unwrap();

    assert_eq!(project.name, "Haggadah Yeshuas Nissan");
    assert_eq!(project.description.as_deref(), Some("Main Haggadah project"));

    let projects = studio.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, project.id);
    assert_eq!(studio.get_project(project.id).unwrap(), project);
}

#[test]
fn invalid_project_is_rejected_and_not_stored() {
    let mut studio = studio();
    let err = studio.create_project(ProjectDraft::new("")).unwrap_err();
    assert!(matches!(err, StudioError::Validation(e) if e.has_field("name")));
    assert!(studio.list_projects().unwrap().is_empty());
}

#[test]
fn unknown_project_not_found() {
    let mut studio = studio();
    let unknown: ProjectId = "00000000-0000-0000-0000-000000000000".parse().unwrap();

    let err = studio.get_project(unknown).unwrap_err();
    assert_eq!(err.to_string(), "Project not found");

    assert!(matches!(
        studio.list_documents(unknown),
        Err(StudioError::ProjectNotFound(id)) if id == unknown
    ));
    assert!(matches!(
        studio.create_document(unknown, DocumentDraft::new("Should Not Exist")),
        Err(StudioError::ProjectNotFound(_))
    ));
}

#[test]
fn documents_initially_empty() {
    let mut studio = studio();
    let project_id = sample_project(&mut studio);
    assert!(studio.list_documents(project_id).unwrap().is_empty());
}

#[test]
fn create_and_get_document() {
    let mut studio = studio();
    let project_id = sample_project(&mut studio);

    let created = studio.create_document(project_id, export_payload()).unwrap();
    assert_eq!(created.project_id, project_id);
    assert_eq!(created.blocks.len(), 3);
    assert_eq!(created.blocks[0].kind(), "text");
    assert_eq!(created.blocks[0].role(), "haggadah_main_hebrew");

    let got = studio.get_document(project_id, created.id).unwrap();
    assert_eq!(got, created);
    assert_eq!(studio.list_documents(project_id).unwrap(), vec![created]);
}

#[test]
fn unknown_document_not_found() {
    let mut studio = studio();
    let project_id = sample_project(&mut studio);
    let unknown: DocumentId = "00000000-0000-0000-0000-000000000000".parse().unwrap();

    let err = studio.get_document(project_id, unknown).unwrap_err();
    assert_eq!(err.to_string(), "Document not found");
}

#[test]
fn document_under_other_project_not_found() {
    let mut studio = studio();
    let owner = sample_project(&mut studio);
    let other = sample_project(&mut studio);
    let doc = studio.create_document(owner, DocumentDraft::new("Maggid")).unwrap();

    assert!(matches!(
        studio.get_document(other, doc.id),
        Err(StudioError::DocumentNotFound(_))
    ));
}

#[test]
fn update_replaces_whole_document() {
    let mut studio = studio();
    let project_id = sample_project(&mut studio);
    let created = studio.create_document(project_id, DocumentDraft::new("Kadesh Urchatz")).unwrap();

    let updated = studio
        .update_document(project_id, created.id, export_payload())
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, "Maggid Export Test");
    assert_eq!(updated.blocks.len(), 3);

    let updated = studio
        .update_document(
            project_id,
            created.id,
            DocumentDraft::new("Trimmed").with_blocks(vec![Block::text("footnote_he", "הערה")]),
        )
        .unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(
        studio.get_document(project_id, created.id).unwrap().blocks,
        vec![Block::text("footnote_he", "הערה")]
    );
}

#[test]
fn invalid_update_leaves_document_untouched() {
    let mut studio = studio();
    let project_id = sample_project(&mut studio);
    let created = studio.create_document(project_id, export_payload()).unwrap();

    let bad = DocumentDraft::new("Still valid title").with_blocks(vec![Block::text("", "x")]);
    let err = studio.update_document(project_id, created.id, bad).unwrap_err();
    assert!(matches!(err, StudioError::Validation(_)));

    assert_eq!(studio.get_document(project_id, created.id).unwrap(), created);
}

#[test]
fn export_contains_title_and_blocks() {
    let mut studio = studio();
    let project_id = sample_project(&mut studio);
    let doc = studio.create_document(project_id, export_payload()).unwrap();

    let export = studio.export_html(project_id, doc.id).unwrap();
    let html = &export.html;

    assert_eq!(export.document_id, doc.id);
    assert_eq!(export.version, doc.content_version());
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Maggid Export Test"));
    assert!(html.contains("הא לחמא עניא"));
    assert!(html.contains("This section introduces the theme of spiritual poverty."));
    assert!(html.contains("/images/matzah_oven_01.jpg"));
    assert!(html.contains("class=\"block block-text block-role-haggadah_main_hebrew\""));
    assert!(html.contains("class=\"block block-image block-role-archaeology_fig\""));
}

#[test]
fn export_through_file_store() {
    let dir = tempdir().unwrap();
    let mut studio = Studio::new(FileStore::open(dir.path().join("store")).unwrap());

    let project = studio.create_project(ProjectDraft::new("Export Test Haggadah")).unwrap();
    let doc = studio.create_document(project.id, export_payload()).unwrap();
    let first = studio.export_html(project.id, doc.id).unwrap();

    let reopened = Studio::new(FileStore::open(dir.path().join("store")).unwrap());
    let second = reopened.export_html(project.id, doc.id).unwrap();

    assert_eq!(first, second);
}
