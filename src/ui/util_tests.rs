#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(2000), "$"), "$2,000.00");
    assert_eq!(format_amount(dec!(150), "$"), "$150.00");
    assert_eq!(format_amount(Decimal::ZERO, "$"), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-150), "$"), "-$150.00");
    assert_eq!(format_amount(dec!(-1234567.891), "$"), "-$1,234,567.89");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(0.005), "$"), "$0.01");
    assert_eq!(format_amount(dec!(-0.001), "$"), "$0.00");
    assert_eq!(format_amount(dec!(19.999), "$"), "$20.00");
}

#[test]
fn test_format_amount_currency_prefix() {
    assert_eq!(format_amount(dec!(42.5), "€"), "€42.50");
    assert_eq!(format_amount(dec!(42.5), ""), "42.50");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── cursor helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..10 {
        scroll_down(&mut index, &mut scroll, 3, 2);
    }
    assert_eq!(index, 2);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_up_pulls_scroll() {
    let (mut index, mut scroll) = (5, 5);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (4, 4));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_cursor_after_shrink() {
    let (mut index, mut scroll) = (7, 6);
    clamp_cursor(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));
    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0.3, 10), "[███░░░░░░░]");
    assert_eq!(progress_bar(1.5, 4), "[████]");
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
}
