//! Column picker overlay.

use crate::state::App;
use crate::views::centered_rect;
use ordex_core::ANCHOR_COLUMN;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App) {
    let area = centered_rect(50, 70, f.size());
    f.render_widget(Clear, area);

    let mut lines = Vec::with_capacity(app.registry.columns().len());
    for (index, column) in app.registry.columns().iter().enumerate() {
        let marker = if column.visible { "[x]" } else { "[ ]" };
        let suffix = if column.id == ANCHOR_COLUMN { " (fixa)" } else { "" };
        let mut style = if column.id == ANCHOR_COLUMN {
            Style::default().fg(app.theme.text_dim)
        } else {
            Style::default().fg(app.theme.text)
        };
        if index == app.picker_index {
            style = style
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            format!(" {} {}{}", marker, column.label, suffix),
            style,
        )));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Colunas (espaço alterna, Esc fecha)")
            .border_style(Style::default().fg(app.theme.primary)),
    );
    f.render_widget(list, area);
}
