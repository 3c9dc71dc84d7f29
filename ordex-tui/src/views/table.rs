//! The service-order table: header, rows, and zero states.
//!
//! The header is rendered cell by cell so each cell's screen position can be
//! reported back as a `HeaderLayout` for mouse hit-testing. The header stays
//! up even when the body shows a zero-state message, so columns can be
//! arranged before the first fetch.

use crate::interaction::{HeaderCell, HeaderLayout};
use crate::state::App;
use crate::theme::status_color;
use ordex_core::format::render_plain;
use ordex_core::{ColumnDescriptor, DropSide, ServiceOrder};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) -> HeaderLayout {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return HeaderLayout::default();
    }

    let columns: Vec<&ColumnDescriptor> = app.registry.visible().collect();
    let widths: Vec<u16> = columns
        .iter()
        .map(|c| app.column_width(c.id, c.label))
        .collect();

    let header_layout = render_header_row(f, app, inner, &columns, &widths);

    let body = Rect {
        x: inner.x,
        y: inner.y + 1,
        width: inner.width,
        height: inner.height.saturating_sub(1),
    };
    if let Some(message) = app.table_message() {
        let paragraph =
            Paragraph::new(message).style(Style::default().fg(app.theme.text_dim));
        f.render_widget(paragraph, body);
    } else {
        render_rows(f, app, body, &columns, &widths);
    }

    header_layout
}

fn render_header_row(
    f: &mut Frame<'_>,
    app: &App,
    inner: Rect,
    columns: &[&ColumnDescriptor],
    widths: &[u16],
) -> HeaderLayout {
    let drag = app.interaction.drag_hover();
    let mut layout = HeaderLayout {
        y: inner.y,
        cells: Vec::new(),
    };

    let mut spans = Vec::new();
    let mut x = inner.x;
    for (index, (column, width)) in columns.iter().zip(widths).enumerate() {
        if x >= inner.x + inner.width {
            break;
        }
        let width = (*width).min(inner.x + inner.width - x);
        layout.cells.push(HeaderCell {
            visible_index: index,
            x,
            width,
        });

        let mut style = Style::default()
            .fg(app.theme.text)
            .bg(app.theme.header_bg)
            .add_modifier(Modifier::BOLD);
        if let Some((from, hover)) = drag {
            if from == index {
                style = style.fg(app.theme.text_dim);
            }
            if let Some((target, side)) = hover {
                if target == index {
                    // Underline marks the drop edge while dragging.
                    style = style.fg(app.theme.drag_indicator).add_modifier(
                        match side {
                            DropSide::Left => Modifier::UNDERLINED,
                            DropSide::Right => Modifier::UNDERLINED | Modifier::ITALIC,
                        },
                    );
                }
            }
        }
        spans.push(Span::styled(pad(column.label, width), style));
        x += width;
    }

    let header = Paragraph::new(Line::from(spans));
    f.render_widget(
        header,
        Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: 1,
        },
    );
    layout
}

fn render_rows(
    f: &mut Frame<'_>,
    app: &App,
    body: Rect,
    columns: &[&ColumnDescriptor],
    widths: &[u16],
) {
    let height = body.height as usize;
    if height == 0 {
        return;
    }
    // Keep the selected row inside the window.
    let first = app.table.selected.saturating_sub(height.saturating_sub(1));

    let mut lines = Vec::with_capacity(height);
    for (offset, row) in app.table.rows.iter().skip(first).take(height).enumerate() {
        let index = first + offset;
        let selected = index == app.table.selected;
        let mut spans = Vec::with_capacity(columns.len());
        let mut x = 0u16;
        for (column, width) in columns.iter().copied().zip(widths) {
            if x >= body.width {
                break;
            }
            let width = (*width).min(body.width - x);
            let mut style = Style::default().fg(app.theme.text);
            if column.id == "situacao" {
                let status = row.situacao.as_deref().unwrap_or("");
                style = style.fg(status_color(status, &app.theme));
            }
            if selected {
                style = style.bg(app.theme.selection_bg);
            }
            spans.push(Span::styled(pad(&cell_text(row, column), width), style));
            x += width;
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), body);
}

fn cell_text(row: &ServiceOrder, column: &ColumnDescriptor) -> String {
    let value = row.value(column.id).unwrap_or(Value::Null);
    match column.render {
        Some(render) => render(&value),
        None => render_plain(&value),
    }
}

/// Pad or truncate to an exact display width, leaving one trailing space as
/// a column gutter.
fn pad(text: &str, width: u16) -> String {
    let width = width as usize;
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}
