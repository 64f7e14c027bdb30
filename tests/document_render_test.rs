//! Document rendering integrity.
//!
//! The renderer must be total over the block kinds, keep block order, and a
//! malformed block in the data must never take the document down.

use specdeck::document::{parse_document, DOCUMENT};
use specdeck::models::ContentBlock;
use specdeck::session::EditSession;
use specdeck::ui::blocks::{render_block, render_section};
use specdeck::ui::editor::EditorView;

fn default_view(session: &EditSession) -> EditorView<'_> {
    EditorView {
        session,
        path_value: "",
        focus_path: false,
        focus_instruction: false,
        ingesting: false,
        source_error: None,
    }
}

fn text_of(lines: &[ratatui::text::Line]) -> String {
    lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_every_embedded_block_renders_non_empty() {
    let session = EditSession::new();
    let view = default_view(&session);
    for section in &DOCUMENT.sections {
        for block in &section.blocks {
            let lines = render_block(block, &view, 100);
            assert!(
                !lines.is_empty(),
                "block kind {} in section {} rendered empty",
                block.kind(),
                section.id
            );
        }
    }
}

#[test]
fn test_every_section_renders() {
    let session = EditSession::new();
    let view = default_view(&session);
    for section in &DOCUMENT.sections {
        let lines = render_section(section, &view, 100);
        assert!(!lines.is_empty(), "section {} rendered empty", section.id);
    }
}

#[test]
fn test_image_section_embeds_the_lab_between_prose() {
    let session = EditSession::new();
    let view = default_view(&session);
    let section = DOCUMENT.sections.last().unwrap();
    let text = text_of(&render_section(section, &view, 100));

    let intro = text.find("image enhancement prototype").expect("intro prose");
    let lab = text.find("Output Aspect Ratio").expect("editor panel");
    let outro = text.find("Usage Instructions").expect("trailing prose");
    assert!(intro < lab && lab < outro, "blocks keep their document order");
}

#[test]
fn test_malformed_block_does_not_break_surrounding_document() {
    let json = r#"{
        "label": "Doc",
        "version": "v0",
        "sections": [{
            "id": "mixed",
            "title": "Mixed",
            "icon": "target",
            "blocks": [
                {"kind": "text", "body": "before"},
                {"kind": "table", "title": "broken", "items": ["list", "shaped"]},
                {"kind": "flow", "steps": ["after"]}
            ]
        }]
    }"#;
    let doc = parse_document(json).unwrap();
    let section = &doc.sections[0];
    assert_eq!(section.blocks.len(), 2);

    let session = EditSession::new();
    let view = default_view(&session);
    let text = text_of(&render_section(section, &view, 100));
    assert!(text.contains("before"));
    assert!(text.contains("after"));
    assert!(!text.contains("broken"));
}

#[test]
fn test_table_block_matches_embedded_features() {
    let section = DOCUMENT
        .sections
        .iter()
        .find(|s| s.id == "datastructure")
        .unwrap();
    let table = section
        .blocks
        .iter()
        .find_map(|b| match b {
            ContentBlock::Table { headers, rows, .. } => Some((headers, rows)),
            _ => None,
        })
        .expect("feature table present");
    assert_eq!(table.0.len(), 5);
    assert!(table.1.iter().all(|row| row.len() == 5));
}
