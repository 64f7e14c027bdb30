//! The embedded specification document.
//!
//! The full document ships inside the binary as JSON and is parsed once at
//! startup. Each block decodes independently: a block whose payload does not
//! match its declared kind is logged and skipped so the rest of the section
//! still renders.

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ContentBlock, DocumentSection};

/// Raw document JSON compiled into the binary.
const DOCUMENT_JSON: &str = include_str!("../assets/document.json");

/// The parsed, immutable document. Built on first access.
pub static DOCUMENT: Lazy<Document> =
    Lazy::new(|| parse_document(DOCUMENT_JSON).expect("embedded document is valid JSON"));

/// Document metadata plus the ordered section list.
#[derive(Debug, Clone)]
pub struct Document {
    /// Header label, e.g. "Specification Document"
    pub label: String,
    /// Document version string shown in the header
    pub version: String,
    pub sections: Vec<DocumentSection>,
}

/// Errors raised while parsing the document envelope.
///
/// Malformed individual blocks are not an error: they are skipped with a
/// warning. Only a broken envelope (top-level structure) fails the parse.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document structure: {0}")]
    Structure(#[from] serde_json::Error),
    #[error("document has no sections")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    label: String,
    version: String,
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    id: String,
    title: String,
    icon: String,
    blocks: Vec<Value>,
}

/// Parse a document from JSON text.
pub fn parse_document(json: &str) -> Result<Document, DocumentError> {
    let raw: RawDocument = serde_json::from_str(json)?;
    if raw.sections.is_empty() {
        return Err(DocumentError::Empty);
    }

    let sections = raw
        .sections
        .into_iter()
        .map(|section| DocumentSection {
            blocks: decode_blocks(section.blocks, &section.id),
            id: section.id,
            title: section.title,
            icon: section.icon,
        })
        .collect();

    Ok(Document {
        label: raw.label,
        version: raw.version,
        sections,
    })
}

/// Decode blocks one by one, dropping the ones that do not match their
/// declared kind. The document keeps rendering around them.
fn decode_blocks(raw: Vec<Value>, section_id: &str) -> Vec<ContentBlock> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<ContentBlock>(value) {
            Ok(block) => Some(block),
            Err(err) => {
                tracing::warn!(
                    section = section_id,
                    block_index = idx,
                    error = %err,
                    "skipping malformed content block"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_document_parses() {
        let doc = parse_document(DOCUMENT_JSON).unwrap();
        assert_eq!(doc.label, "Specification Document");
        assert_eq!(doc.version, "v1.0");
        assert_eq!(doc.sections.len(), 8);
    }

    #[test]
    fn test_embedded_document_section_order() {
        let doc = parse_document(DOCUMENT_JSON).unwrap();
        let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "goals",
                "architecture",
                "datastructure",
                "modules",
                "api",
                "flow",
                "deployment",
                "image-engine"
            ]
        );
    }

    #[test]
    fn test_image_tool_lives_in_last_section() {
        let doc = parse_document(DOCUMENT_JSON).unwrap();
        let last = doc.sections.last().unwrap();
        assert!(last
            .blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::ImageTool { .. })));
        // The tool is embedded between prose blocks, in sequence.
        assert_eq!(last.blocks.len(), 3);
        assert_eq!(last.blocks[1].kind(), "image_tool");
    }

    #[test]
    fn test_malformed_block_is_skipped_not_fatal() {
        let json = r#"{
            "label": "Doc",
            "version": "v0",
            "sections": [{
                "id": "s1",
                "title": "Section",
                "icon": "target",
                "blocks": [
                    {"kind": "text", "body": "first"},
                    {"kind": "table", "items": ["payload", "for", "a", "list"]},
                    {"kind": "text", "body": "last"}
                ]
            }]
        }"#;
        let doc = parse_document(json).unwrap();
        let blocks = &doc.sections[0].blocks;
        assert_eq!(blocks.len(), 2, "malformed middle block must be dropped");
        assert_eq!(blocks[0].kind(), "text");
        assert_eq!(blocks[1].kind(), "text");
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let json = r#"{
            "label": "Doc",
            "version": "v0",
            "sections": [{
                "id": "s1",
                "title": "Section",
                "icon": "target",
                "blocks": [{"kind": "hologram"}, {"kind": "flow", "steps": ["a"]}]
            }]
        }"#;
        let doc = parse_document(json).unwrap();
        assert_eq!(doc.sections[0].blocks.len(), 1);
    }

    #[test]
    fn test_empty_document_rejected() {
        let json = r#"{"label": "Doc", "version": "v0", "sections": []}"#;
        assert!(matches!(parse_document(json), Err(DocumentError::Empty)));
    }

    #[test]
    fn test_lazy_static_document() {
        assert_eq!(DOCUMENT.sections.len(), 8);
    }
}
