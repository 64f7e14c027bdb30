//! Color theme constants for the specdeck UI.
//!
//! Minimal dark palette; accent blue follows the source document's styling.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and the active section
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for captions and hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Section/block titles
pub const COLOR_TITLE: Color = Color::White;

/// Highlighted architecture layer and selected controls
pub const COLOR_HIGHLIGHT: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Checklist bullets and success states
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Error text
pub const COLOR_ERROR: Color = Color::Red;

/// Code sample body
pub const COLOR_CODE: Color = Color::Gray;

/// Language tags, paths, and other monospace metadata
pub const COLOR_MONO_META: Color = Color::Cyan;

/// In-flight/loading indicator
pub const COLOR_PENDING: Color = Color::Yellow;

/// GET method badge
pub const COLOR_METHOD_GET: Color = Color::Rgb(0, 122, 204);

/// POST method badge
pub const COLOR_METHOD_POST: Color = Color::Rgb(4, 181, 117);
