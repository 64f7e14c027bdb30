//! Inline markdown rendering for prose blocks.
//!
//! Converts the light markdown used in document prose (bold, italic, inline
//! code) to styled ratatui Lines. Block-level markdown constructs are not
//! needed here: tables, lists and code samples are first-class block kinds
//! with their own renderers.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Style for `inline code` fragments.
const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

/// Render prose text to styled lines.
///
/// Each paragraph becomes one line group; explicit newlines inside the text
/// are preserved as separate lines. Unknown or partial markdown renders as
/// plain text rather than failing.
pub fn render_prose(text: &str) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(text, Options::empty());
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![Style::default()];

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Strong => {
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    style_stack.push(current.add_modifier(Modifier::BOLD));
                }
                Tag::Emphasis => {
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    style_stack.push(current.add_modifier(Modifier::ITALIC));
                }
                Tag::Paragraph => {
                    if !lines.is_empty() {
                        lines.push(Line::default());
                    }
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Strong | TagEnd::Emphasis => {
                    style_stack.pop();
                }
                TagEnd::Paragraph => {
                    if !current_spans.is_empty() {
                        lines.push(Line::from(std::mem::take(&mut current_spans)));
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                let style = *style_stack.last().unwrap_or(&Style::default());
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    if !first.is_empty() {
                        current_spans.push(Span::styled(first.to_string(), style));
                    }
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current_spans)));
                    if !part.is_empty() {
                        current_spans.push(Span::styled(part.to_string(), style));
                    }
                }
            }
            Event::Code(code) => {
                current_spans.push(Span::styled(code.to_string(), STYLE_INLINE_CODE));
            }
            Event::SoftBreak | Event::HardBreak => {
                lines.push(Line::from(std::mem::take(&mut current_spans)));
            }
            _ => {}
        }
    }

    if !current_spans.is_empty() {
        lines.push(Line::from(current_spans));
    }

    lines
}
