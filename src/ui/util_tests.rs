#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(12.5)), "$12.50");
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.10)), "-$42.10");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent_rounds_to_one_place() {
    assert_eq!(format_percent(dec!(75)), "75.0%");
    assert_eq!(
        format_percent(dec!(650) / dec!(600) * dec!(100)),
        "108.3%"
    );
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_fill_levels() {
    assert_eq!(progress_bar(dec!(0), 10), "░░░░░░░░░░");
    assert_eq!(progress_bar(dec!(50), 10), "█████░░░░░");
    assert_eq!(progress_bar(dec!(100), 10), "██████████");
}

#[test]
fn test_progress_bar_clamps_overspend() {
    assert_eq!(progress_bar(dec!(250), 10), "██████████");
    assert_eq!(progress_bar(dec!(-5), 10), "░░░░░░░░░░");
}

#[test]
fn test_progress_bar_zero_width() {
    assert_eq!(progress_bar(dec!(50), 0), "");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello w…");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café münchën", 6), "café …");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_and_up() {
    let mut index = 0;
    let mut scroll = 0;
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (1, 0));
    scroll_down(&mut index, &mut scroll, 5, 3);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (3, 1));

    scroll_up(&mut index, &mut scroll);
    scroll_up(&mut index, &mut scroll);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let mut index = 2;
    let mut scroll = 0;
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_jumps() {
    let mut index = 0;
    let mut scroll = 0;
    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!((index, scroll), (19, 15));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let mut index = 0;
    let mut scroll = 0;
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (0, 0));
}
