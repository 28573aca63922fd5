#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_expense(amount: Decimal) -> Expense {
    Expense::new(
        1,
        amount,
        "Test".into(),
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    )
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_new_defaults() {
    let cat = Category::new("Food".into(), dec!(600));
    assert!(cat.id.is_none());
    assert_eq!(cat.name, "Food");
    assert_eq!(cat.budget, dec!(600));
    assert_eq!(cat.color, "#4CAF50");
}

#[test]
fn test_category_display() {
    let cat = Category::new("Groceries".into(), dec!(500));
    assert_eq!(format!("{cat}"), "Groceries");
}

#[test]
fn test_category_validate_ok() {
    assert!(Category::new("Food".into(), dec!(600)).validate().is_ok());
    // Zero budget is allowed; it just reads as the 100% sentinel once spent.
    assert!(Category::new("Food".into(), Decimal::ZERO).validate().is_ok());
}

#[test]
fn test_category_validate_rejects_negative_budget() {
    assert!(Category::new("Food".into(), dec!(-1)).validate().is_err());
}

#[test]
fn test_category_validate_rejects_blank_name() {
    assert!(Category::new(String::new(), dec!(600)).validate().is_err());
    assert!(Category::new("   ".into(), dec!(600)).validate().is_err());
}

#[test]
fn test_category_find_by_name_case_insensitive() {
    let cats = vec![
        Category::new("Food".into(), dec!(600)),
        Category::new("Rent".into(), dec!(1500)),
    ];
    assert!(Category::find_by_name(&cats, "food").is_some());
    assert!(Category::find_by_name(&cats, "RENT").is_some());
    assert!(Category::find_by_name(&cats, "fun").is_none());
}

#[test]
fn test_category_find_by_id() {
    let mut cat = Category::new("Food".into(), dec!(600));
    cat.id = Some(7);
    let cats = vec![cat];
    assert!(Category::find_by_id(&cats, 7).is_some());
    assert!(Category::find_by_id(&cats, 8).is_none());
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new_defaults() {
    let expense = make_expense(dec!(12.50));
    assert!(expense.id.is_none());
    assert_eq!(expense.category_id, 1);
    assert_eq!(expense.amount, dec!(12.50));
    assert!(!expense.created_at.is_empty());
}

#[test]
fn test_expense_validate_minimum() {
    assert!(make_expense(dec!(0.01)).validate().is_ok());
    assert!(make_expense(dec!(0.001)).validate().is_err());
    assert!(make_expense(Decimal::ZERO).validate().is_err());
    assert!(make_expense(dec!(-5.00)).validate().is_err());
}

#[test]
fn test_expense_min_amount_is_one_cent() {
    assert_eq!(Expense::min_amount(), dec!(0.01));
}
