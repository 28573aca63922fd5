#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_test_data(db: &Database) -> i64 {
    let cat = Category::new("Groceries".into(), dec!(500.00));
    let cat_id = db.insert_category(&cat).unwrap();

    let expenses = vec![
        Expense::new(cat_id, dec!(42.50), "weekly shop".into(), date(2024, 1, 10)),
        Expense::new(cat_id, dec!(17.25), "farmers market".into(), date(2024, 1, 15)),
        Expense::new(cat_id, dec!(63.00), "weekly shop".into(), date(2024, 2, 3)),
    ];
    for e in &expenses {
        db.insert_expense(e).unwrap();
    }
    cat_id
}

// ── Category CRUD ─────────────────────────────────────────────

#[test]
fn test_category_crud() {
    let db = Database::open_in_memory().unwrap();
    let cat = Category::new("Rent".into(), dec!(1500.00));
    let id = db.insert_category(&cat).unwrap();

    let fetched = db.get_category_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name, "Rent");
    assert_eq!(fetched.budget, dec!(1500.00));
    assert_eq!(fetched.color, "#4CAF50");

    let mut edited = fetched;
    edited.name = "Housing".into();
    edited.budget = dec!(1600.00);
    edited.color = "#FF5722".into();
    db.update_category(&edited).unwrap();

    let fetched = db.get_category_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name, "Housing");
    assert_eq!(fetched.budget, dec!(1600.00));
    assert_eq!(fetched.color, "#FF5722");

    db.delete_category(id).unwrap();
    assert!(db.get_category_by_id(id).unwrap().is_none());
}

#[test]
fn test_category_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_category_by_id(99999).unwrap().is_none());
}

#[test]
fn test_categories_sorted_by_name() {
    let db = Database::open_in_memory().unwrap();
    db.insert_category(&Category::new("Utilities".into(), dec!(200)))
        .unwrap();
    db.insert_category(&Category::new("Food".into(), dec!(600)))
        .unwrap();
    db.insert_category(&Category::new("Rent".into(), dec!(1500)))
        .unwrap();

    let names: Vec<String> = db
        .get_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Food", "Rent", "Utilities"]);
}

#[test]
fn test_duplicate_category_name_rejected() {
    let db = Database::open_in_memory().unwrap();
    db.insert_category(&Category::new("Food".into(), dec!(600)))
        .unwrap();
    assert!(db
        .insert_category(&Category::new("Food".into(), dec!(700)))
        .is_err());
}

#[test]
fn test_update_category_without_id_fails() {
    let db = Database::open_in_memory().unwrap();
    let cat = Category::new("Food".into(), dec!(600));
    assert!(db.update_category(&cat).is_err());
}

// ── Expense CRUD ──────────────────────────────────────────────

#[test]
fn test_expense_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let cat_id = setup_test_data(&db);

    let all = db.get_all_expenses().unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|e| e.category_id == cat_id));

    let first = all
        .iter()
        .find(|e| e.date == date(2024, 1, 10))
        .unwrap();
    assert_eq!(first.amount, dec!(42.50));
    assert_eq!(first.description, "weekly shop");
}

#[test]
fn test_expense_month_filter() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);

    let january = db.get_expenses(None, None, None, Some("2024-01")).unwrap();
    assert_eq!(january.len(), 2);

    let february = db.get_expenses(None, None, None, Some("2024-02")).unwrap();
    assert_eq!(february.len(), 1);
    assert_eq!(february[0].amount, dec!(63.00));
}

#[test]
fn test_expense_search_filter() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);

    let hits = db.get_expenses(None, None, Some("market"), None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "farmers market");

    let none = db.get_expenses(None, None, Some("zzz"), None).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_expense_category_filter() {
    let db = Database::open_in_memory().unwrap();
    let cat_id = setup_test_data(&db);
    let other = db
        .insert_category(&Category::new("Travel".into(), dec!(300)))
        .unwrap();
    db.insert_expense(&Expense::new(
        other,
        dec!(120.00),
        "train".into(),
        date(2024, 1, 12),
    ))
    .unwrap();

    let mine = db.get_expenses(None, Some(cat_id), None, None).unwrap();
    assert_eq!(mine.len(), 3);
    let theirs = db.get_expenses(None, Some(other), None, None).unwrap();
    assert_eq!(theirs.len(), 1);
}

#[test]
fn test_expense_list_order_and_limit() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);

    let all = db.get_expenses(None, None, None, None).unwrap();
    let dates: Vec<NaiveDate> = all.iter().map(|e| e.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);

    let limited = db.get_expenses(Some(2), None, None, None).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn test_expense_update_and_delete() {
    let db = Database::open_in_memory().unwrap();
    let cat_id = setup_test_data(&db);
    let other = db
        .insert_category(&Category::new("Dining".into(), dec!(200)))
        .unwrap();

    let expenses = db.get_expenses(None, Some(cat_id), None, None).unwrap();
    let id = expenses[0].id.unwrap();

    db.update_expense_description(id, "bulk shop").unwrap();
    db.update_expense_category(id, other).unwrap();

    let moved = db.get_expenses(None, Some(other), None, None).unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].description, "bulk shop");

    db.delete_expense(id).unwrap();
    assert!(db.get_expenses(None, Some(other), None, None).unwrap().is_empty());
    assert_eq!(db.get_expense_count().unwrap(), 2);
}

// ── Dangling references ───────────────────────────────────────

#[test]
fn test_delete_category_leaves_expenses() {
    let db = Database::open_in_memory().unwrap();
    let cat_id = setup_test_data(&db);

    db.delete_category(cat_id).unwrap();

    // Expenses survive with a dangling category_id.
    let orphans = db.get_all_expenses().unwrap();
    assert_eq!(orphans.len(), 3);
    assert!(orphans.iter().all(|e| e.category_id == cat_id));

    // And the engine reports them as unattributed, not as a crash.
    let cats = db.get_categories().unwrap();
    let window = crate::aggregate::Window::month_of(date(2024, 1, 15));
    let total = crate::aggregate::total_spent(&cats, &orphans, window);
    assert_eq!(total, rust_decimal::Decimal::ZERO);
    let dangling = crate::aggregate::unattributed_spend(&cats, &orphans, window);
    assert_eq!(dangling, dec!(59.75));
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn test_reopen_preserves_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outlay.db");

    {
        let db = Database::open(&path).unwrap();
        setup_test_data(&db);
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_categories().unwrap().len(), 1);
    assert_eq!(db.get_expense_count().unwrap(), 3);
}

#[test]
fn test_amounts_roundtrip_exactly() {
    let db = Database::open_in_memory().unwrap();
    let cat_id = db
        .insert_category(&Category::new("Misc".into(), dec!(0.01)))
        .unwrap();
    db.insert_expense(&Expense::new(
        cat_id,
        dec!(1234567.89),
        String::new(),
        date(2024, 1, 1),
    ))
    .unwrap();

    let cats = db.get_categories().unwrap();
    assert_eq!(cats[0].budget, dec!(0.01));
    let expenses = db.get_all_expenses().unwrap();
    assert_eq!(expenses[0].amount, dec!(1234567.89));
}
