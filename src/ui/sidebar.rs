//! Section list sidebar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::DocumentSection;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HIGHLIGHT};

/// Glyph for a section's icon name. Unknown names get a neutral bullet.
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "target" => "◎",
        "layers" => "≡",
        "database" => "▤",
        "cpu" => "▣",
        "server" => "≣",
        "git-merge" => "⎇",
        "rocket" => "➤",
        "wand" => "✦",
        _ => "•",
    }
}

/// Render the section list with the active entry highlighted.
pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    sections: &[DocumentSection],
    active: usize,
    focused: bool,
) {
    let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(" Sections ");

    let items: Vec<ListItem> = sections
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let style = if idx == active {
                Style::default().fg(COLOR_HIGHLIGHT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", icon_glyph(&section.icon)), style),
                Span::styled(section.title.clone(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
