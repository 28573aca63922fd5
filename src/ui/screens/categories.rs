use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.categories.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No categories yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :category <name> [budget]",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "e.g. :category Groceries 500",
                Style::default().fg(theme::ACCENT),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Categories (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Name", "Budget", "Spent", "Left", "Used", "Color"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cat)| {
            // Summaries are keyed by id; a category without one this month
            // has simply spent nothing.
            let summary = cat
                .id
                .and_then(|id| app.summaries.iter().find(|s| s.category_id == Some(id)));
            let spent = summary.map_or(Decimal::ZERO, |s| s.spent);
            let left = summary.map_or(cat.budget, |s| s.remaining());
            let percentage = summary.map_or(Decimal::ZERO, |s| s.percentage);

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(cat.name.clone()),
                Cell::from(format_amount(cat.budget)),
                Cell::from(format_amount(spent)),
                Cell::from(Span::styled(
                    format_amount(left),
                    Style::default().fg(if left < Decimal::ZERO {
                        theme::RED
                    } else {
                        theme::TEXT
                    }),
                )),
                Cell::from(Span::styled(
                    format_percent(percentage),
                    Style::default().fg(theme::utilization_color(percentage)),
                )),
                Cell::from(cat.color.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Categories ({}) ", app.categories.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
