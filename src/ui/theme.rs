use ratatui::style::{Color, Modifier, Style};

pub(crate) const HEADER_BG: Color = Color::Rgb(40, 44, 52);
pub(crate) const HEADER_FG: Color = Color::Rgb(171, 178, 191);
pub(crate) const ACCENT: Color = Color::Rgb(97, 175, 239);
pub(crate) const GREEN: Color = Color::Rgb(152, 195, 121);
pub(crate) const RED: Color = Color::Rgb(224, 108, 117);
pub(crate) const YELLOW: Color = Color::Rgb(229, 192, 123);
pub(crate) const SURFACE: Color = Color::Rgb(50, 56, 66);
pub(crate) const TEXT: Color = Color::Rgb(171, 178, 191);
pub(crate) const TEXT_DIM: Color = Color::Rgb(92, 99, 112);
pub(crate) const OVERLAY: Color = Color::Rgb(62, 68, 81);
pub(crate) const COMMAND_BG: Color = Color::Rgb(33, 37, 43);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Progress color thresholds: green under 75%, yellow under 90%, red at
/// 90% and above.
pub(crate) fn utilization_color(percentage: rust_decimal::Decimal) -> Color {
    use rust_decimal::Decimal;
    if percentage >= Decimal::from(90) {
        RED
    } else if percentage >= Decimal::from(75) {
        YELLOW
    } else {
        GREEN
    }
}
