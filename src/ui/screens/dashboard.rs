use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Per-category budgets
            Constraint::Length(4), // Daily spending sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_budget_list(f, chunks[1], app);
    render_daily_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let remaining = app.total_budget - app.total_spent;

    render_card(f, cards[0], "Total Budget", app.total_budget, theme::ACCENT, None);
    render_card(
        f,
        cards[1],
        "Spent",
        app.total_spent,
        theme::RED,
        (app.unattributed > Decimal::ZERO)
            .then(|| format!("+{} unattributed", format_amount(app.unattributed))),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        remaining,
        if remaining >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
    render_card(
        f,
        cards[3],
        "Daily Avg",
        app.daily_average,
        theme::YELLOW,
        Some(format!("over {} days", app.window().days())),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_budget_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Budgets ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.summaries.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No categories yet. Create one with :category <name> <budget>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bar_width = 20;
    let mut lines: Vec<Line> = Vec::new();
    for summary in &app.summaries {
        let color = theme::utilization_color(summary.percentage);
        let name = truncate(&summary.name, 16);
        let over_marker = if summary.over_budget { " OVER" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!(" {name:<17}"), theme::normal_style()),
            Span::styled(progress_bar(summary.percentage, bar_width), Style::default().fg(color)),
            Span::styled(
                format!(" {:>7}", format_percent(summary.percentage)),
                Style::default().fg(color),
            ),
            Span::styled(
                format!(
                    "  {} / {}",
                    format_amount(summary.spent),
                    format_amount(summary.budget)
                ),
                theme::dim_style(),
            ),
            Span::styled(
                over_marker,
                Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if app.unattributed > Decimal::ZERO {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Unattributed     ", theme::dim_style()),
            Span::styled(
                format_amount(app.unattributed),
                Style::default().fg(theme::YELLOW),
            ),
            Span::styled(
                "  (expenses whose category was deleted)",
                theme::dim_style(),
            ),
        ]));
    }

    let list = Paragraph::new(lines).block(block);
    f.render_widget(list, area);
}

fn render_daily_sparkline(f: &mut Frame, area: Rect, app: &App) {
    // Cents keep small amounts visible in the sparkline scale.
    let data: Vec<u64> = app
        .series
        .iter()
        .map(|b| (b.amount * Decimal::from(100)).to_u64().unwrap_or(0))
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(" Daily Spending: {} ", app.month_label()),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
