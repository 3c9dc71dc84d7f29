//! View rendering dispatch.

pub mod filters;
pub mod picker;
pub mod table;

use crate::interaction::HeaderLayout;
use crate::keys::InputMode;
use crate::notifications::NotificationLevel;
use crate::state::App;
use ordex_core::format::format_brl;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw one frame. Returns where the table header landed so the next mouse
/// event can be resolved against it; an open overlay swallows the header.
pub fn render_view(f: &mut Frame<'_>, app: &App) -> HeaderLayout {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    filters::render(f, app, layout[1]);
    let header_layout = table::render(f, app, layout[2]);
    render_footer(f, app, layout[3]);

    if app.mode == InputMode::Picker {
        picker::render(f, app);
        return HeaderLayout::default();
    }
    if app.help_visible {
        render_help(f, app);
        return HeaderLayout::default();
    }
    header_layout
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "ordex | Ordens de Serviço | {} colunas visíveis",
        app.registry.visible_count()
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let totals = app.table.totals();
    let visible = |id: &str| app.registry.descriptor(id).map(|c| c.visible).unwrap_or(false);
    let mut summary = format!("{} ordens", totals.count);
    if visible("total_ordem_servico") {
        summary.push_str(&format!(" | Total: {}", format_brl(totals.total_ordem_servico)));
    }
    if visible("total_servicos") {
        summary.push_str(&format!(" | Serviços: {}", format_brl(totals.total_servicos)));
    }
    if visible("total_pecas") {
        summary.push_str(&format!(" | Peças: {}", format_brl(totals.total_pecas)));
    }
    let help = "Enter buscar • c limpar • d período • s status • f campo • v valor • o colunas • ? ajuda • q sair";

    let (text, style) = if let Some(note) = app.notifications.last() {
        let color = match note.level {
            NotificationLevel::Info => app.theme.info,
            NotificationLevel::Warning => app.theme.warning,
            NotificationLevel::Error => app.theme.error,
            NotificationLevel::Success => app.theme.success,
        };
        (
            format!("{} | {}", summary, note.message),
            Style::default().fg(color),
        )
    } else {
        (
            format!("{} | {}", summary, help),
            Style::default().fg(app.theme.text_dim),
        )
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame<'_>, app: &App) {
    let area = centered_rect(60, 50, f.size());
    f.render_widget(Clear, area);
    let text = concat!(
        "Enter / a    buscar com os filtros atuais\n",
        "c            limpar filtros\n",
        "d            alternar período\n",
        "s            alternar status\n",
        "f            alternar campo de busca\n",
        "v            editar valor da busca\n",
        "[ / ]        editar data inicial / final\n",
        "o            mostrar/ocultar colunas\n",
        "j/k          navegar linhas\n",
        "mouse        arrastar cabeçalho reordena, borda direita redimensiona\n",
        "q            sair",
    );
    let help = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Atalhos")
                .border_style(Style::default().fg(app.theme.primary)),
        )
        .style(Style::default().fg(app.theme.text));
    f.render_widget(help, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
