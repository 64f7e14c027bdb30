//! Core data model: content blocks, document sections, and image values.
//!
//! A [`ContentBlock`] is one self-contained renderable unit of the
//! specification document, tagged with a kind and a kind-specific payload.
//! Blocks are deserialized from the embedded document JSON with serde's
//! internal tagging, so a payload that does not match its declared kind
//! fails to decode instead of producing a half-valid value.

use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// One layer of a layered-architecture diagram.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchLayer {
    /// Layer name, rendered as an uppercase caption
    pub name: String,
    /// Component labels inside the layer
    pub items: Vec<String>,
    /// Whether the layer is drawn in the accent color
    #[serde(default)]
    pub highlight: bool,
}

/// One endpoint descriptor of an API specification block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Endpoint path
    pub path: String,
    /// One-line summary
    pub summary: String,
    /// Request body sample (pre-formatted, possibly multi-line)
    pub request: String,
    /// Response sample (pre-formatted, possibly multi-line)
    pub response: String,
}

/// One renderable unit of the document.
///
/// The enum is the closed set of block kinds; the renderer matches on it
/// exhaustively, so adding a kind without a presentation is a compile error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Prose paragraph with optional inline markdown
    Text {
        #[serde(default)]
        title: Option<String>,
        body: String,
    },
    /// Checklist-style bullet list
    List {
        #[serde(default)]
        title: Option<String>,
        items: Vec<String>,
    },
    /// Code sample with a language tag
    Code {
        #[serde(default)]
        title: Option<String>,
        language: String,
        source: String,
    },
    /// Column headers plus data rows
    Table {
        #[serde(default)]
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Layered architecture diagram
    Architecture {
        #[serde(default)]
        title: Option<String>,
        layers: Vec<ArchLayer>,
    },
    /// API endpoint descriptors
    ApiSpec {
        #[serde(default)]
        title: Option<String>,
        endpoints: Vec<Endpoint>,
    },
    /// Ordered step timeline
    Flow {
        #[serde(default)]
        title: Option<String>,
        steps: Vec<String>,
    },
    /// Embedded interactive image-edit tool
    ImageTool {
        #[serde(default)]
        title: Option<String>,
    },
}

impl ContentBlock {
    /// The block's optional display title.
    pub fn title(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { title, .. }
            | ContentBlock::List { title, .. }
            | ContentBlock::Code { title, .. }
            | ContentBlock::Table { title, .. }
            | ContentBlock::Architecture { title, .. }
            | ContentBlock::ApiSpec { title, .. }
            | ContentBlock::Flow { title, .. }
            | ContentBlock::ImageTool { title, .. } => title.as_deref(),
        }
    }

    /// Stable kind name, matching the `kind` discriminator in document JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::List { .. } => "list",
            ContentBlock::Code { .. } => "code",
            ContentBlock::Table { .. } => "table",
            ContentBlock::Architecture { .. } => "architecture",
            ContentBlock::ApiSpec { .. } => "api_spec",
            ContentBlock::Flow { .. } => "flow",
            ContentBlock::ImageTool { .. } => "image_tool",
        }
    }
}

/// One section of the document: a unique id, a title, an icon name, and an
/// ordered block sequence. Built once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct DocumentSection {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub blocks: Vec<ContentBlock>,
}

/// Target aspect ratio for generated images.
///
/// Closed set; the wire labels are the only accepted spellings and there is
/// no general ratio parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Standard,
    Portrait,
    Widescreen,
    Mobile,
}

impl AspectRatio {
    /// All ratios in picker order.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Standard,
        AspectRatio::Portrait,
        AspectRatio::Widescreen,
        AspectRatio::Mobile,
    ];

    /// Wire label sent to the generation service.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Standard => "4:3",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Mobile => "9:16",
        }
    }

    /// Human-readable picker label.
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Standard => "Standard (4:3)",
            AspectRatio::Portrait => "Portrait (3:4)",
            AspectRatio::Widescreen => "Widescreen (16:9)",
            AspectRatio::Mobile => "Mobile (9:16)",
        }
    }

    /// Look up a ratio by its wire label.
    pub fn from_str_opt(s: &str) -> Option<AspectRatio> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }

    /// Next ratio in picker order, wrapping around.
    pub fn next(&self) -> AspectRatio {
        let idx = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous ratio in picker order, wrapping around.
    pub fn prev(&self) -> AspectRatio {
        let idx = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// An in-memory image: declared media type plus the raw binary payload.
///
/// The payload is kept byte-for-byte as produced by its source; nothing in
/// the viewer re-encodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
    /// Raw image bytes
    pub payload: Bytes,
}

impl EncodedImage {
    pub fn new(media_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }

    /// Payload size in bytes.
    pub fn byte_size(&self) -> usize {
        self.payload.len()
    }

    /// First 8 hex chars of the payload's sha256, for display and dedup.
    pub fn short_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.payload);
        let digest = hasher.finalize();
        hex::encode(&digest[..4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_block() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"kind":"text","title":"Vision","body":"Hello"}"#).unwrap();
        assert_eq!(
            block,
            ContentBlock::Text {
                title: Some("Vision".to_string()),
                body: "Hello".to_string()
            }
        );
        assert_eq!(block.kind(), "text");
        assert_eq!(block.title(), Some("Vision"));
    }

    #[test]
    fn test_decode_table_block() {
        let block: ContentBlock = serde_json::from_str(
            r#"{"kind":"table","headers":["A","B"],"rows":[["1","2"],["3","4"]]}"#,
        )
        .unwrap();
        match block {
            ContentBlock::Table { title, headers, rows } => {
                assert!(title.is_none());
                assert_eq!(headers, vec!["A", "B"]);
                assert_eq!(rows.len(), 2);
            }
            other => panic!("Expected Table, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_architecture_block() {
        let block: ContentBlock = serde_json::from_str(
            r#"{"kind":"architecture","layers":[{"name":"LLM Layer","items":["Parser"],"highlight":true},{"name":"Data","items":["PostgreSQL"]}]}"#,
        )
        .unwrap();
        match block {
            ContentBlock::Architecture { layers, .. } => {
                assert!(layers[0].highlight);
                assert!(!layers[1].highlight);
            }
            other => panic!("Expected Architecture, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_payload_mismatch_fails_to_decode() {
        // Declares table but carries a list payload: must not decode.
        let result = serde_json::from_str::<ContentBlock>(
            r#"{"kind":"table","title":"Broken","items":["a","b"]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_kind_fails_to_decode() {
        let result = serde_json::from_str::<ContentBlock>(r#"{"kind":"hologram","body":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_aspect_ratio_wire_labels() {
        let labels: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(labels, vec!["1:1", "4:3", "3:4", "16:9", "9:16"]);
        assert_eq!(AspectRatio::default(), AspectRatio::Square);
    }

    #[test]
    fn test_aspect_ratio_from_str() {
        assert_eq!(AspectRatio::from_str_opt("4:3"), Some(AspectRatio::Standard));
        assert_eq!(AspectRatio::from_str_opt("2:1"), None);
        assert_eq!(AspectRatio::from_str_opt("16:10"), None);
    }

    #[test]
    fn test_aspect_ratio_cycling_wraps() {
        let mut ratio = AspectRatio::default();
        for _ in 0..AspectRatio::ALL.len() {
            ratio = ratio.next();
        }
        assert_eq!(ratio, AspectRatio::default());
        assert_eq!(AspectRatio::Square.prev(), AspectRatio::Mobile);
    }

    #[test]
    fn test_encoded_image_short_hash() {
        let img = EncodedImage::new("image/png", vec![1u8, 2, 3]);
        assert_eq!(img.short_hash().len(), 8);
        assert_eq!(img.short_hash(), EncodedImage::new("image/jpeg", vec![1u8, 2, 3]).short_hash());
        assert_ne!(img.short_hash(), EncodedImage::new("image/png", vec![9u8]).short_hash());
    }

    #[test]
    fn test_encoded_image_preserves_payload() {
        let bytes = vec![0xFFu8, 0xD8, 0xFF, 0xE0, 0x00];
        let img = EncodedImage::new("image/jpeg", bytes.clone());
        assert_eq!(img.payload.as_ref(), bytes.as_slice());
        assert_eq!(img.byte_size(), 5);
    }
}
