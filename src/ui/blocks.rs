//! Content block rendering.
//!
//! Maps every [`ContentBlock`] kind to styled terminal lines. Pure line
//! building: no I/O and no state beyond the read-only editor view passed in
//! for the embedded tool. Blocks render in the order given.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::markdown;
use crate::models::{ArchLayer, ContentBlock, DocumentSection, Endpoint};
use crate::ui::editor::{self, EditorView};
use crate::ui::theme::{
    COLOR_BORDER, COLOR_CODE, COLOR_DIM, COLOR_HIGHLIGHT, COLOR_METHOD_GET, COLOR_METHOD_POST,
    COLOR_MONO_META, COLOR_SUCCESS, COLOR_TITLE,
};

/// Render a whole section: every block in sequence, separated by one blank
/// line.
pub fn render_section(
    section: &DocumentSection,
    view: &EditorView,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in &section.blocks {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(render_block(block, view, width));
    }
    lines
}

/// Render one block.
///
/// Total over the block enum: every kind has a presentation, enforced by the
/// exhaustive match. The embedded tool delegates to the editor panel.
pub fn render_block(block: &ContentBlock, view: &EditorView, width: u16) -> Vec<Line<'static>> {
    let mut lines = title_lines(block.title());
    match block {
        ContentBlock::Text { body, .. } => {
            lines.extend(markdown::render_prose(body));
        }
        ContentBlock::List { items, .. } => {
            for item in items {
                lines.push(Line::from(vec![
                    Span::styled(" ✓ ", Style::default().fg(COLOR_SUCCESS)),
                    Span::raw(item.clone()),
                ]));
            }
        }
        ContentBlock::Code { language, source, .. } => {
            lines.extend(render_code(language, source));
        }
        ContentBlock::Table { headers, rows, .. } => {
            lines.extend(render_table(headers, rows, width));
        }
        ContentBlock::Architecture { layers, .. } => {
            lines.extend(render_architecture(layers, width));
        }
        ContentBlock::ApiSpec { endpoints, .. } => {
            for (idx, endpoint) in endpoints.iter().enumerate() {
                if idx > 0 {
                    lines.push(Line::default());
                }
                lines.extend(render_endpoint(endpoint));
            }
        }
        ContentBlock::Flow { steps, .. } => {
            lines.extend(render_flow(steps));
        }
        ContentBlock::ImageTool { .. } => {
            lines.extend(editor::render_editor(view, width));
        }
    }
    lines
}

fn title_lines(title: Option<&str>) -> Vec<Line<'static>> {
    match title {
        Some(title) => vec![Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(COLOR_TITLE).add_modifier(Modifier::BOLD),
        ))],
        None => Vec::new(),
    }
}

fn render_code(language: &str, source: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" {language} "),
        Style::default().fg(COLOR_MONO_META).add_modifier(Modifier::REVERSED),
    ))];
    for line in source.lines() {
        lines.push(Line::from(Span::styled(
            format!("  {line}"),
            Style::default().fg(COLOR_CODE),
        )));
    }
    lines
}

fn render_table(headers: &[String], rows: &[Vec<String>], width: u16) -> Vec<Line<'static>> {
    let widths = column_widths(headers, rows, width as usize);
    let mut lines = Vec::new();

    lines.push(table_row(
        headers,
        &widths,
        Style::default().fg(COLOR_TITLE).add_modifier(Modifier::BOLD),
    ));

    let rule: String = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::from(Span::styled(rule, Style::default().fg(COLOR_BORDER))));

    for row in rows {
        lines.push(table_row(row, &widths, Style::default()));
    }
    lines
}

fn table_row(cells: &[String], widths: &[usize], style: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, col_width) in widths.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(COLOR_BORDER)));
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        spans.push(Span::styled(pad_to_width(cell, *col_width), style));
    }
    Line::from(spans)
}

/// Column widths from content, shrunk proportionally when the natural widths
/// overflow the viewport.
fn column_widths(headers: &[String], rows: &[Vec<String>], total: usize) -> Vec<usize> {
    let columns = headers.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(header.width());
    }
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let separators = columns.saturating_sub(1) * 3;
    let available = total.saturating_sub(separators).max(columns);
    let natural: usize = widths.iter().sum();
    if natural > available {
        for w in widths.iter_mut() {
            *w = (*w * available / natural).max(4);
        }
    }
    widths
}

/// Pad or truncate a string to an exact display width.
fn pad_to_width(text: &str, target: usize) -> String {
    let text_width = text.width();
    if text_width <= target {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(target - text_width));
        return out;
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > target {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(target.saturating_sub(used)));
    out
}

fn render_architecture(layers: &[ArchLayer], width: u16) -> Vec<Line<'static>> {
    let inner = (width as usize).saturating_sub(2).max(20);
    let mut lines = Vec::new();
    for (idx, layer) in layers.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        let color = if layer.highlight { COLOR_HIGHLIGHT } else { COLOR_BORDER };
        let border = Style::default().fg(color);

        lines.push(Line::from(Span::styled(
            format!("┌{}┐", "┄".repeat(inner)),
            border,
        )));
        lines.push(boxed_line(
            Span::styled(
                layer.name.to_uppercase(),
                Style::default().fg(COLOR_DIM).add_modifier(Modifier::BOLD),
            ),
            inner,
            border,
        ));
        let chips = layer
            .items
            .iter()
            .map(|item| format!("[ {item} ]"))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(boxed_line(Span::raw(chips), inner, border));
        lines.push(Line::from(Span::styled(
            format!("└{}┘", "┄".repeat(inner)),
            border,
        )));
    }
    lines
}

/// A content span framed by box-border glyphs, padded to the inner width.
fn boxed_line(content: Span<'static>, inner: usize, border: Style) -> Line<'static> {
    let padded = pad_to_width(&format!(" {}", content.content), inner);
    Line::from(vec![
        Span::styled("┆", border),
        Span::styled(padded, content.style),
        Span::styled("┆", border),
    ])
}

fn render_endpoint(endpoint: &Endpoint) -> Vec<Line<'static>> {
    let method_color = match endpoint.method.as_str() {
        "GET" => COLOR_METHOD_GET,
        _ => COLOR_METHOD_POST,
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", endpoint.method),
            Style::default().fg(method_color).add_modifier(Modifier::REVERSED),
        ),
        Span::styled(format!(" {} ", endpoint.path), Style::default().fg(COLOR_MONO_META)),
        Span::styled(endpoint.summary.clone(), Style::default().fg(COLOR_DIM)),
    ])];

    for (caption, sample) in [("REQUEST", &endpoint.request), ("RESPONSE", &endpoint.response)] {
        lines.push(Line::from(Span::styled(
            format!("   {caption}"),
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::BOLD),
        )));
        for line in sample.lines() {
            lines.push(Line::from(Span::styled(
                format!("   {line}"),
                Style::default().fg(COLOR_CODE),
            )));
        }
    }
    lines
}

fn render_flow(steps: &[String]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, step) in steps.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(Span::styled(" │", Style::default().fg(COLOR_BORDER))));
        }
        lines.push(Line::from(vec![
            Span::styled(" ● ", Style::default().fg(COLOR_HIGHLIGHT)),
            Span::styled(
                format!("{}. ", idx + 1),
                Style::default().fg(COLOR_DIM),
            ),
            Span::raw(step.clone()),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EditSession;

    fn view_over(session: &EditSession) -> EditorView<'_> {
        EditorView {
            session,
            path_value: "",
            focus_path: false,
            focus_instruction: false,
            ingesting: false,
            source_error: None,
        }
    }

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_blocks() -> Vec<ContentBlock> {
        vec![
            ContentBlock::Text {
                title: Some("T".into()),
                body: "prose".into(),
            },
            ContentBlock::List {
                title: None,
                items: vec!["one".into(), "two".into()],
            },
            ContentBlock::Code {
                title: None,
                language: "json".into(),
                source: "{\n  \"a\": 1\n}".into(),
            },
            ContentBlock::Table {
                title: None,
                headers: vec!["H1".into(), "H2".into()],
                rows: vec![vec!["a".into(), "b".into()]],
            },
            ContentBlock::Architecture {
                title: None,
                layers: vec![ArchLayer {
                    name: "LLM Layer".into(),
                    items: vec!["Parser".into()],
                    highlight: true,
                }],
            },
            ContentBlock::ApiSpec {
                title: None,
                endpoints: vec![Endpoint {
                    method: "POST".into(),
                    path: "/api/v1/x".into(),
                    summary: "Do X".into(),
                    request: "{}".into(),
                    response: "200 OK".into(),
                }],
            },
            ContentBlock::Flow {
                title: None,
                steps: vec!["first".into(), "second".into()],
            },
            ContentBlock::ImageTool {
                title: Some("Editor".into()),
            },
        ]
    }

    #[test]
    fn test_every_kind_renders_non_empty() {
        let session = EditSession::new();
        let view = view_over(&session);
        for block in sample_blocks() {
            let lines = render_block(&block, &view, 80);
            assert!(!lines.is_empty(), "kind {} rendered empty", block.kind());
        }
    }

    #[test]
    fn test_blocks_render_in_sequence() {
        let session = EditSession::new();
        let view = view_over(&session);
        let section = DocumentSection {
            id: "s".into(),
            title: "S".into(),
            icon: "target".into(),
            blocks: vec![
                ContentBlock::Text { title: None, body: "alpha".into() },
                ContentBlock::Text { title: None, body: "beta".into() },
            ],
        };
        let text = text_of(&render_section(&section, &view, 80));
        let alpha = text.find("alpha").unwrap();
        let beta = text.find("beta").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_table_columns_align() {
        let lines = render_table(
            &["Feature".to_string(), "Type".to_string()],
            &[
                vec!["dsr".to_string(), "Float".to_string()],
                vec!["ctos_legal_flags".to_string(), "Boolean".to_string()],
            ],
            80,
        );
        // Header, rule, two rows.
        assert_eq!(lines.len(), 4);
        let text = text_of(&lines);
        assert!(text.contains("Feature"));
        assert!(text.contains("─┼─"));
    }

    #[test]
    fn test_table_shrinks_to_viewport() {
        let wide_cell = "x".repeat(200);
        let lines = render_table(
            &["A".to_string(), "B".to_string()],
            &[vec![wide_cell.clone(), wide_cell]],
            60,
        );
        for line in &lines {
            let width: usize = line.spans.iter().map(|s| s.content.width()).sum();
            assert!(width <= 60, "table line overflows viewport: {width}");
        }
    }

    #[test]
    fn test_pad_to_width_truncates_with_ellipsis() {
        let padded = pad_to_width("abcdefgh", 5);
        assert_eq!(padded.width(), 5);
        assert!(padded.contains('…'));
        assert_eq!(pad_to_width("ab", 4), "ab  ");
    }

    #[test]
    fn test_architecture_highlight_color() {
        let layers = vec![
            ArchLayer { name: "A".into(), items: vec!["x".into()], highlight: true },
            ArchLayer { name: "B".into(), items: vec!["y".into()], highlight: false },
        ];
        let lines = render_architecture(&layers, 60);
        let highlighted = lines
            .iter()
            .filter(|l| l.spans.iter().any(|s| s.style.fg == Some(COLOR_HIGHLIGHT)))
            .count();
        assert!(highlighted >= 4, "highlighted layer frame uses the accent color");
    }

    #[test]
    fn test_flow_numbers_steps() {
        let text = text_of(&render_flow(&["a".to_string(), "b".to_string()]));
        assert!(text.contains("1. a"));
        assert!(text.contains("2. b"));
        assert!(text.contains("│"), "steps are joined by a timeline");
    }

    #[test]
    fn test_endpoint_shows_method_and_samples() {
        let endpoint = Endpoint {
            method: "POST".into(),
            path: "/api/v1/ingest/report".into(),
            summary: "Upload".into(),
            request: "FormData".into(),
            response: "200 OK".into(),
        };
        let text = text_of(&render_endpoint(&endpoint));
        assert!(text.contains("POST"));
        assert!(text.contains("/api/v1/ingest/report"));
        assert!(text.contains("REQUEST"));
        assert!(text.contains("RESPONSE"));
    }
}
