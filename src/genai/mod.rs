//! Generation client for the remote image-edit service.
//!
//! Builds the `generateContent` request from session inputs, sends it over
//! the [`HttpClient`] abstraction, and interprets the response: the first
//! inline image part wins, a response without one is a distinct informational
//! failure, and everything transport- or service-side surfaces its message
//! verbatim.

pub mod payloads;

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

use crate::config::GeminiConfig;
use crate::models::{AspectRatio, EncodedImage};
use crate::traits::{Headers, HttpClient};
use self::payloads::{GenerateContentRequest, GenerateContentResponse, ServiceErrorResponse};

/// Media type assumed when the service omits one on an image part.
const DEFAULT_RESULT_MEDIA_TYPE: &str = "image/png";

/// A decoded generation result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub image: EncodedImage,
    pub width: u32,
    pub height: u32,
}

/// Classified generation failures.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// The service responded but produced no image part anywhere.
    #[error("The model processed the request but did not return an image. It might have returned text instead.")]
    NoImageReturned,
    /// Transport, authentication, or service-side failure; message verbatim.
    #[error("{0}")]
    Service(String),
}

/// Client for the remote generation service.
pub struct GenAiClient {
    http: Arc<dyn HttpClient>,
    config: GeminiConfig,
}

impl GenAiClient {
    pub fn new(http: Arc<dyn HttpClient>, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Run one edit: source image + instruction + aspect ratio in, decoded
    /// image out.
    pub async fn generate(
        &self,
        source: &EncodedImage,
        instruction: &str,
        ratio: AspectRatio,
    ) -> Result<GeneratedImage, GenerateError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                GenerateError::Service(format!(
                    "No API key configured. Set {} or add it to the config file.",
                    crate::config::API_KEY_ENV
                ))
            })?;

        let request = GenerateContentRequest::new(source, instruction, ratio);
        let body = serde_json::to_string(&request)
            .map_err(|e| GenerateError::Service(format!("failed to encode request: {e}")))?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("x-goog-api-key".to_string(), api_key.to_string());

        let url = self.endpoint_url();
        tracing::debug!(model = %self.config.model, ratio = ratio.as_str(), "sending generation request");

        let response = self
            .http
            .post(&url, &body, &headers)
            .await
            .map_err(|e| GenerateError::Service(e.to_string()))?;

        if !response.is_success() {
            return Err(GenerateError::Service(service_error_message(
                response.status,
                &response.text(),
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| GenerateError::Service(format!("unreadable service response: {e}")))?;

        let inline = parsed
            .first_inline_image()
            .ok_or(GenerateError::NoImageReturned)?;

        let payload = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| GenerateError::Service(format!("invalid base64 in image part: {e}")))?;

        // The session contract promises a decodable image; verify here and
        // keep the dimensions for the result caption.
        let decoded = image::load_from_memory(&payload)
            .map_err(|e| GenerateError::Service(format!("undecodable image returned: {e}")))?;

        let media_type = inline
            .mime_type
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_RESULT_MEDIA_TYPE.to_string());

        Ok(GeneratedImage {
            width: decoded.width(),
            height: decoded.height(),
            image: EncodedImage::new(media_type, payload),
        })
    }
}

/// Extract the service's own message from an error body when present.
fn service_error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ServiceErrorResponse>(body)
        .ok()
        .and_then(|e| e.error)
        .map(|d| d.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    if detail.is_empty() {
        format!("service returned status {status}")
    } else {
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::traits::{HttpError, Response};
    use bytes::Bytes;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn source() -> EncodedImage {
        EncodedImage::new("image/jpeg", Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0]))
    }

    fn client_with(mock: &MockHttpClient, api_key: Option<&str>) -> GenAiClient {
        GenAiClient::new(
            Arc::new(mock.clone()),
            GeminiConfig {
                api_key: api_key.map(str::to_string),
                base_url: "http://service.test".to_string(),
                model: "gemini-2.5-flash-image".to_string(),
            },
        )
    }

    fn success_body(png: &[u8]) -> String {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "done"},
                        {"inlineData": {"mimeType": "image/png", "data": BASE64.encode(png)}}
                    ]
                }
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_picks_first_image_part() {
        let mock = MockHttpClient::new();
        let png = tiny_png();
        mock.enqueue_response(Response::new(200, success_body(&png)));

        let client = client_with(&mock, Some("k-test"));
        let result = client
            .generate(&source(), "increase contrast", AspectRatio::Standard)
            .await
            .unwrap();

        assert_eq!(result.image.media_type, "image/png");
        assert_eq!(result.image.payload.as_ref(), png.as_slice());
        assert_eq!((result.width, result.height), (2, 1));
    }

    #[tokio::test]
    async fn test_generate_sends_key_and_payload() {
        let mock = MockHttpClient::new();
        mock.enqueue_response(Response::new(200, success_body(&tiny_png())));

        let client = client_with(&mock, Some("k-test"));
        client
            .generate(&source(), "sharpen", AspectRatio::Mobile)
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "http://service.test/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
        assert_eq!(requests[0].headers.get("x-goog-api-key"), Some(&"k-test".to_string()));
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["contents"][0]["parts"][1]["text"], "sharpen");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
    }

    #[tokio::test]
    async fn test_text_only_response_is_no_image_returned() {
        let mock = MockHttpClient::new();
        mock.enqueue_response(Response::new(
            200,
            r#"{"candidates": [{"content": {"parts": [{"text": "I cannot process this"}]}}]}"#,
        ));

        let client = client_with(&mock, Some("k"));
        let err = client
            .generate(&source(), "sharpen", AspectRatio::Square)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::NoImageReturned));
        assert!(err.to_string().contains("did not return an image"));
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_message() {
        let mock = MockHttpClient::new();
        mock.enqueue_error(HttpError::ConnectionFailed("network unreachable".to_string()));

        let client = client_with(&mock, Some("k"));
        let err = client
            .generate(&source(), "sharpen", AspectRatio::Square)
            .await
            .unwrap_err();
        match err {
            GenerateError::Service(msg) => assert!(msg.contains("network unreachable")),
            other => panic!("Expected Service, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_error_body_message_surfaces_verbatim() {
        let mock = MockHttpClient::new();
        mock.enqueue_response(Response::new(
            403,
            r#"{"error": {"code": 403, "message": "API key not valid. Please pass a valid API key.", "status": "PERMISSION_DENIED"}}"#,
        ));

        let client = client_with(&mock, Some("bad"));
        let err = client
            .generate(&source(), "sharpen", AspectRatio::Square)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let mock = MockHttpClient::new();
        let client = client_with(&mock, None);
        let err = client
            .generate(&source(), "sharpen", AspectRatio::Square)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_image_is_a_service_error() {
        let mock = MockHttpClient::new();
        mock.enqueue_response(Response::new(
            200,
            serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": BASE64.encode(b"not a png")}}]}
                }]
            })
            .to_string(),
        ));

        let client = client_with(&mock, Some("k"));
        let err = client
            .generate(&source(), "sharpen", AspectRatio::Square)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Service(_)));
        assert!(err.to_string().contains("undecodable image"));
    }

    #[test]
    fn test_service_error_message_falls_back_to_body() {
        assert_eq!(service_error_message(500, "gateway timeout"), "gateway timeout");
        assert_eq!(service_error_message(502, "  "), "service returned status 502");
    }
}
