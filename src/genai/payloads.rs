//! Wire types for the `generateContent` endpoint.
//!
//! The request carries two parts (the source image as inline data plus the
//! instruction text) and the target aspect ratio as image configuration. The
//! response is an ordered part sequence per candidate; parts may carry text,
//! inline image data, or both.

use serde::{Deserialize, Serialize};

use crate::ingest;
use crate::models::{AspectRatio, EncodedImage};

/// Inline binary content: media type plus base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

/// One content part, either text or inline data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: Some(mime_type.into()),
                data: data.into(),
            }),
        }
    }
}

/// An ordered part sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Image-specific generation settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

/// Generation settings envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub image_config: ImageConfig,
}

/// Request body for `models/<model>:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Build the single-turn edit request: source image first, then the
    /// instruction, with the target aspect ratio as configuration.
    pub fn new(source: &EncodedImage, instruction: &str, ratio: AspectRatio) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data(source.media_type.clone(), ingest::to_base64(source)),
                    Part::text(instruction),
                ],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: ratio.as_str().to_string(),
                },
            },
        }
    }
}

/// One response candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The first part carrying inline image data, in sequence order.
    ///
    /// Accompanying text parts are ignored; a response with no image-bearing
    /// part anywhere yields `None`.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

/// Error envelope returned by the service on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorResponse {
    #[serde(default)]
    pub error: Option<ServiceErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorDetail {
    #[serde(default)]
    pub message: String,
}
