//! UI rendering for specdeck.
//!
//! Frame layout: header bar, sidebar with the section list, the content
//! column rendering the active section's blocks, and a footer with key
//! hints. The content column is a single scrollable paragraph so blocks keep
//! their document order, the embedded image lab included.

pub mod blocks;
pub mod editor;
mod sidebar;
pub mod theme;

use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use editor::EditorView;
use sidebar::render_sidebar;
use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 34;

/// Render the full frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [sidebar_area, content_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .areas(body_area);

    // Header: document label, version, active section.
    let header = Line::from(vec![
        Span::styled(
            " SPECDECK ",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::styled(
            format!(" {} / {} ", app.document.label, app.document.version),
            Style::default().fg(COLOR_DIM),
        ),
        Span::styled(
            app.active_section().title.clone(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    render_sidebar(
        frame,
        sidebar_area,
        &app.document.sections,
        app.active_section,
        app.focus == Focus::Sections,
    );

    // Content column.
    let inner_width = content_area.width.saturating_sub(4);
    let view = EditorView {
        session: &app.session,
        path_value: &app.path_input,
        focus_path: app.focus == Focus::SourcePath,
        focus_instruction: app.focus == Focus::Instruction,
        ingesting: app.ingesting,
        source_error: app.source_error.as_deref(),
    };
    let lines = blocks::render_section(app.active_section(), &view, inner_width);

    let visible = content_area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible) as u16;
    app.scroll = app.scroll.min(max_scroll);

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(COLOR_BORDER))
                .padding(ratatui::widgets::Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(content, content_area);

    // Footer: key hints for the current focus.
    let hints = match app.focus {
        Focus::Sections => {
            if app.active_section_has_tool() {
                " ↑/↓ sections · PgUp/PgDn scroll · Tab image lab · q quit"
            } else {
                " ↑/↓ sections · PgUp/PgDn scroll · q quit"
            }
        }
        Focus::SourcePath => {
            " type path · Enter load · Ctrl+V clipboard · ←/→ ratio · Ctrl+G generate · Esc back"
        }
        Focus::Instruction => {
            " type instruction · Enter generate · ←/→ ratio · Esc back"
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(COLOR_DIM)))),
        footer_area,
    );
}
