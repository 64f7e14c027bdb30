//! The embedded image-edit panel.
//!
//! Renders the edit session as lines inside the document flow: source
//! selection, aspect-ratio picker, instruction entry, and the status /
//! result / error area. All interactivity is handled by the session through
//! the app's key handling; this module only reads.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::models::{AspectRatio, EncodedImage};
use crate::session::{EditSession, SessionStatus};
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HIGHLIGHT, COLOR_MONO_META,
    COLOR_PENDING, COLOR_SUCCESS,
};

/// Read-only view over everything the panel needs.
pub struct EditorView<'a> {
    pub session: &'a EditSession,
    /// Current contents of the source-path input
    pub path_value: &'a str,
    pub focus_path: bool,
    pub focus_instruction: bool,
    /// A file read is outstanding
    pub ingesting: bool,
    /// Last file/clipboard ingestion failure, if any
    pub source_error: Option<&'a str>,
}

/// Render the whole panel.
///
/// The panel stays narrow by construction; the hosting content column clips
/// anything wider, so no width-aware wrapping happens here.
pub fn render_editor(view: &EditorView, _width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(caption("Original Image"));
    lines.push(input_line(view.path_value, view.focus_path, "path to a scan (.png, .jpg, ...)"));
    if view.ingesting {
        lines.push(Line::from(Span::styled(
            "   reading file…",
            Style::default().fg(COLOR_PENDING),
        )));
    }
    if let Some(error) = view.source_error {
        lines.push(Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(COLOR_ERROR)),
            Span::styled(error.to_string(), Style::default().fg(COLOR_ERROR)),
        ]));
    }
    match view.session.source() {
        Some(image) => lines.push(image_summary_line("   ● ", image, COLOR_SUCCESS)),
        None => lines.push(Line::from(Span::styled(
            "   Enter a file path and press Enter, or Ctrl+V to paste from the clipboard",
            Style::default().fg(COLOR_DIM),
        ))),
    }

    lines.push(Line::default());
    lines.push(caption("Output Aspect Ratio"));
    lines.push(ratio_picker_line(view.session.aspect_ratio()));

    lines.push(Line::default());
    lines.push(caption("Edit Instruction"));
    lines.push(input_line(
        view.session.instruction(),
        view.focus_instruction,
        "Describe your edit (e.g. 'Add a retro filter', 'Remove background')",
    ));

    lines.push(Line::default());
    lines.extend(status_lines(view));
    lines
}

fn caption(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    ))
}

/// A single-line input: bracket frame, value or dim placeholder, block
/// cursor when focused.
fn input_line(value: &str, focused: bool, placeholder: &str) -> Line<'static> {
    let frame_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    let mut spans = vec![Span::styled("   [ ", Style::default().fg(frame_color))];

    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder.to_string(), Style::default().fg(COLOR_DIM)));
    } else {
        spans.push(Span::styled(value.to_string(), Style::default().fg(COLOR_ACCENT)));
    }
    if focused {
        spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT)));
    }
    spans.push(Span::styled(" ]", Style::default().fg(frame_color)));
    Line::from(spans)
}

fn ratio_picker_line(selected: AspectRatio) -> Line<'static> {
    let mut spans = vec![Span::raw("   ")];
    for (idx, ratio) in AspectRatio::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        if *ratio == selected {
            spans.push(Span::styled(
                format!("◉ {}", ratio.label()),
                Style::default().fg(COLOR_HIGHLIGHT).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!("○ {}", ratio.label()),
                Style::default().fg(COLOR_DIM),
            ));
        }
    }
    Line::from(spans)
}

fn status_lines(view: &EditorView) -> Vec<Line<'static>> {
    let session = view.session;
    let mut lines = Vec::new();

    match session.status() {
        SessionStatus::Idle => {
            lines.push(Line::from(Span::styled(
                " Select a source image to begin",
                Style::default().fg(COLOR_DIM),
            )));
        }
        SessionStatus::Ready => {
            if session.can_generate() {
                lines.push(Line::from(vec![
                    Span::styled(" ▶ Generate ", Style::default().fg(COLOR_HIGHLIGHT).add_modifier(Modifier::REVERSED)),
                    Span::styled("  Ctrl+G", Style::default().fg(COLOR_DIM)),
                ]));
            } else {
                // Missing input: a disabled action, not an error.
                lines.push(Line::from(vec![
                    Span::styled(" ▶ Generate ", Style::default().fg(COLOR_DIM).add_modifier(Modifier::REVERSED)),
                    Span::styled("  enter an instruction first", Style::default().fg(COLOR_DIM)),
                ]));
            }
        }
        SessionStatus::InFlight => {
            lines.push(Line::from(Span::styled(
                " ◌ Generating…",
                Style::default().fg(COLOR_PENDING),
            )));
        }
        SessionStatus::Succeeded => {
            lines.push(Line::from(Span::styled(
                " ✔ Done",
                Style::default().fg(COLOR_SUCCESS).add_modifier(Modifier::BOLD),
            )));
        }
        SessionStatus::Failed => {
            if let Some(error) = session.error() {
                lines.push(Line::from(vec![
                    Span::styled(" ✗ ", Style::default().fg(COLOR_ERROR)),
                    Span::styled(error.to_string(), Style::default().fg(COLOR_ERROR)),
                ]));
            }
        }
    }

    // Last successful result stays visible through later failures.
    if let Some(result) = session.result() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(" Result ({})", result.aspect_ratio.as_str()),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )));
        if let Some(source) = session.source() {
            lines.push(image_summary_line("   Before  ", source, COLOR_DIM));
        }
        let after_caption = format!(
            "   After   {} · {}×{} · {} · {}  at {}",
            result.image.media_type,
            result.width,
            result.height,
            format_bytes(result.image.byte_size()),
            result.image.short_hash(),
            result.completed_at.format("%H:%M:%S"),
        );
        lines.push(Line::from(Span::styled(
            after_caption,
            Style::default().fg(COLOR_SUCCESS),
        )));
    }

    lines
}

fn image_summary_line(prefix: &str, image: &EncodedImage, color: ratatui::style::Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(prefix.to_string(), Style::default().fg(color)),
        Span::styled(
            format!(
                "{} · {} · {}",
                image.media_type,
                format_bytes(image.byte_size()),
                image.short_hash()
            ),
            Style::default().fg(COLOR_MONO_META),
        ),
    ])
}

/// Human-readable byte size.
fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
