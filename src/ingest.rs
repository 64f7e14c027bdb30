//! Image source adapter: file-based and clipboard-based image ingestion.
//!
//! Turns a user-selected source into an [`EncodedImage`]. File ingestion
//! keeps the file's bytes exactly as read; the media type is derived from
//! magic bytes with an extension fallback. Clipboard ingestion has no file
//! bytes to preserve, so the RGBA pixels are encoded to PNG.
//! No coupling to UI, networking, or session state.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

use crate::models::EncodedImage;

/// Image file extensions recognized for path detection.
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Fallback media type when neither magic bytes nor extension match.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Errors that can occur while ingesting an image.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File could not be read.
    #[error("failed to read {path}: {message}")]
    FileRead { path: String, message: String },
    /// No image found in the clipboard.
    #[error("no image in the clipboard")]
    NoClipboardImage,
    /// Clipboard access failed.
    #[error("clipboard access failed: {0}")]
    Clipboard(String),
    /// Clipboard pixels could not be encoded to PNG.
    #[error("failed to encode clipboard image: {0}")]
    Encode(String),
}

/// Read an image file into an [`EncodedImage`].
///
/// The payload is the file's bytes, unchanged. The read suspends on tokio's
/// file I/O; callers get control back immediately when spawning this.
pub async fn read_image_file(path: &str) -> Result<EncodedImage, IngestError> {
    let path = path.trim();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IngestError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    let media_type = sniff_media_type(&bytes, path);
    Ok(EncodedImage::new(media_type, bytes))
}

/// Read an image from the system clipboard.
///
/// Uses `arboard` for OS-level clipboard access. The RGBA pixel data is
/// encoded to PNG. Blocking; call from `spawn_blocking`.
pub fn read_clipboard_image() -> Result<EncodedImage, IngestError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| IngestError::Clipboard(e.to_string()))?;

    let image_data = clipboard
        .get_image()
        .map_err(|_| IngestError::NoClipboardImage)?;

    let png_bytes = encode_rgba_to_png(
        &image_data.bytes,
        image_data.width as u32,
        image_data.height as u32,
    )?;

    Ok(EncodedImage::new("image/png", png_bytes))
}

/// Check if text looks like a single image file path.
///
/// True for a single line ending with a recognized image extension. Used to
/// treat pasted/dropped file paths as a source selection.
pub fn looks_like_image_path(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return false;
    }
    let lower = trimmed.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Base64-encode an image payload for an inline-data request part.
pub fn to_base64(image: &EncodedImage) -> String {
    BASE64.encode(&image.payload)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Derive a media type from magic bytes, falling back to the extension.
fn sniff_media_type(bytes: &[u8], path: &str) -> String {
    if bytes.len() >= 8 && bytes[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return "image/png".to_string();
    }
    if bytes.len() >= 3 && bytes[..3] == [0xFF, 0xD8, 0xFF] {
        return "image/jpeg".to_string();
    }
    if bytes.len() >= 6 && (&bytes[..6] == b"GIF87a" || &bytes[..6] == b"GIF89a") {
        return "image/gif".to_string();
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return "image/webp".to_string();
    }
    media_type_from_extension(path)
        .unwrap_or(FALLBACK_MEDIA_TYPE)
        .to_string()
}

/// Map a file extension to a media type.
fn media_type_from_extension(path: &str) -> Option<&'static str> {
    let ext = Path::new(path.trim()).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Encode RGBA pixel data to PNG bytes.
fn encode_rgba_to_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, IngestError> {
    use image::{ImageBuffer, RgbaImage};

    let img: RgbaImage = ImageBuffer::from_raw(width, height, rgba.to_vec())
        .ok_or_else(|| IngestError::Encode("invalid RGBA buffer dimensions".into()))?;

    let mut buf = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buf);
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| IngestError::Encode(e.to_string()))?;

    Ok(buf)
}
