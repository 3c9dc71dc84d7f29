//! The filter bar.

use crate::intent::EditTarget;
use crate::keys::InputMode;
use crate::state::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let filter = &app.filter;
    let mut spans = vec![Span::styled(
        format!("Período: {} ", filter.preset.label()),
        Style::default().fg(app.theme.primary),
    )];

    spans.push(date_span(app, EditTarget::StartDate));
    spans.push(Span::raw(" – "));
    spans.push(date_span(app, EditTarget::EndDate));

    let status = if filter.status.is_empty() {
        "Todos"
    } else {
        filter.status.as_str()
    };
    spans.push(Span::styled(
        format!("  |  Status: {}", status),
        Style::default().fg(app.theme.text),
    ));

    if filter.dynamic_field.is_empty() {
        spans.push(Span::styled(
            "  |  Busca: (desativada)",
            Style::default().fg(app.theme.text_dim),
        ));
    } else {
        spans.push(Span::styled(
            format!("  |  Busca: {} contém ", filter.dynamic_field),
            Style::default().fg(app.theme.text),
        ));
        if app.mode == InputMode::Editing(EditTarget::DynamicValue) {
            spans.push(editing_span(app));
        } else {
            spans.push(Span::styled(
                format!("\"{}\"", filter.dynamic_value),
                Style::default().fg(app.theme.primary),
            ));
        }
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Filtros"));
    f.render_widget(bar, area);
}

fn date_span(app: &App, target: EditTarget) -> Span<'static> {
    if app.mode == InputMode::Editing(target) {
        return editing_span(app);
    }
    let date = match target {
        EditTarget::StartDate => app.filter.start_date,
        _ => app.filter.end_date,
    };
    Span::styled(
        date.format("%d/%m/%Y").to_string(),
        Style::default().fg(app.theme.text),
    )
}

fn editing_span(app: &App) -> Span<'static> {
    Span::styled(
        format!("{}_", app.edit_buffer),
        Style::default()
            .fg(app.theme.warning)
            .add_modifier(Modifier::UNDERLINED),
    )
}
