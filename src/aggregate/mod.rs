//! Pure aggregation over category and expense snapshots.
//!
//! Every function here is deterministic and side-effect free: the same
//! categories, expenses, and window always produce the same result, so every
//! screen that renders a number goes through this module and agrees with
//! every other screen. Money is `Decimal` end to end; dates are naive local
//! calendar dates and month windows are plain calendar arithmetic, never
//! wall-clock or timezone math.
//!
//! Input lists carry no ordering guarantee and nothing here assumes one.
//! Malformed-but-well-typed input (empty lists, zero budgets, expenses whose
//! category no longer exists) degrades to zero/empty results; negative
//! amounts are rejected by `validate()` on the models before data gets this
//! far.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Category, Expense};

/// Inclusive calendar-date range, typically one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl Window {
    /// The calendar month containing `date`: first day through last day,
    /// both inclusive.
    pub(crate) fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.checked_sub_days(chrono::Days::new(1)))
            .unwrap_or(start);
        Self { start, end }
    }

    /// Arbitrary inclusive range. `end` before `start` yields a zero-day
    /// window: nothing is contained and every aggregate over it is empty.
    pub(crate) fn span(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days spanned, inclusive on both ends.
    pub(crate) fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Per-category spend within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CategorySpend {
    pub(crate) spent: Decimal,
    pub(crate) count: usize,
}

/// Spent-to-budget ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Utilization {
    /// Full-precision percentage; display rounds to one decimal place.
    pub(crate) percentage: Decimal,
    /// Strict: spending exactly the budget is not over.
    pub(crate) over_budget: bool,
}

/// One calendar day of the spending time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DayBucket {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
}

/// Dashboard row: a category joined with its spend and utilization.
#[derive(Debug, Clone)]
pub(crate) struct CategorySummary {
    pub(crate) category_id: Option<i64>,
    pub(crate) name: String,
    pub(crate) color: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) count: usize,
    pub(crate) percentage: Decimal,
    pub(crate) over_budget: bool,
}

impl CategorySummary {
    pub(crate) fn remaining(&self) -> Decimal {
        self.budget - self.spent
    }
}

/// Stable filter: expenses dated inside the window, input order preserved.
/// Both window bounds are inclusive.
pub(crate) fn expenses_in_window<'a>(expenses: &'a [Expense], window: Window) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| window.contains(e.date))
        .collect()
}

/// Sum and count of this category's expenses within the window.
/// A category with no matching expenses yields `{0, 0}`.
pub(crate) fn category_spend(
    category: &Category,
    expenses: &[Expense],
    window: Window,
) -> CategorySpend {
    let mut spent = Decimal::ZERO;
    let mut count = 0;
    for expense in expenses {
        if category.id == Some(expense.category_id) && window.contains(expense.date) {
            spent += expense.amount;
            count += 1;
        }
    }
    CategorySpend { spent, count }
}

/// Utilization of a category's budget by `spent`.
///
/// A zero budget never divides: any spend against it reads as the 100%
/// sentinel and counts as over budget, while zero spend reads as 0%.
pub(crate) fn utilization(category: &Category, spent: Decimal) -> Utilization {
    if category.budget.is_zero() {
        if spent > Decimal::ZERO {
            return Utilization {
                percentage: Decimal::ONE_HUNDRED,
                over_budget: true,
            };
        }
        return Utilization {
            percentage: Decimal::ZERO,
            over_budget: false,
        };
    }
    Utilization {
        percentage: spent / category.budget * Decimal::ONE_HUNDRED,
        over_budget: spent > category.budget,
    }
}

/// Average spend per calendar day spanned by the window.
pub(crate) fn daily_average(spent: Decimal, window: Window) -> Decimal {
    let days = window.days();
    if days == 0 {
        return Decimal::ZERO;
    }
    spent / Decimal::from(days)
}

/// One bucket per calendar day in the window, chronological, with
/// `amount = 0` for days without expenses. Dangling expenses are real
/// spending and are included; this feeds the trend chart, not the
/// per-category totals.
pub(crate) fn daily_series(expenses: &[Expense], window: Window) -> Vec<DayBucket> {
    if window.days() == 0 {
        return Vec::new();
    }
    let in_window = expenses_in_window(expenses, window);
    window
        .start
        .iter_days()
        .take_while(|d| *d <= window.end)
        .map(|date| {
            let amount = in_window
                .iter()
                .filter(|e| e.date == date)
                .map(|e| e.amount)
                .sum();
            DayBucket { date, amount }
        })
        .collect()
}

/// Sum of budgets across all supplied categories, regardless of spend.
pub(crate) fn total_budget(categories: &[Category]) -> Decimal {
    categories.iter().map(|c| c.budget).sum()
}

/// Sum of per-category spends. Expenses whose category is not in
/// `categories` are excluded, never double-counted; see
/// [`unattributed_spend`] for that remainder.
pub(crate) fn total_spent(categories: &[Category], expenses: &[Expense], window: Window) -> Decimal {
    categories
        .iter()
        .map(|c| category_spend(c, expenses, window).spent)
        .sum()
}

/// In-window spend whose category reference does not resolve against
/// `categories`. Surfaced as its own dashboard bucket rather than silently
/// dropped.
pub(crate) fn unattributed_spend(
    categories: &[Category],
    expenses: &[Expense],
    window: Window,
) -> Decimal {
    expenses
        .iter()
        .filter(|e| window.contains(e.date))
        .filter(|e| Category::find_by_id(categories, e.category_id).is_none())
        .map(|e| e.amount)
        .sum()
}

/// One summary row per category, ordered by utilization descending.
/// Ties break by case-insensitive name, then id, so repeated renders of the
/// same snapshot always list rows in the same order.
pub(crate) fn summarize(
    categories: &[Category],
    expenses: &[Expense],
    window: Window,
) -> Vec<CategorySummary> {
    let mut rows: Vec<CategorySummary> = categories
        .iter()
        .map(|cat| {
            let spend = category_spend(cat, expenses, window);
            let util = utilization(cat, spend.spent);
            CategorySummary {
                category_id: cat.id,
                name: cat.name.clone(),
                color: cat.color.clone(),
                budget: cat.budget,
                spent: spend.spent,
                count: spend.count,
                percentage: util.percentage,
                over_budget: util.over_budget,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.percentage
            .cmp(&a.percentage)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    rows
}
