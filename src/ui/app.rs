use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;

use crate::aggregate::{self, CategorySummary, DayBucket, Window};
use crate::db::Database;
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
    DeleteCategory { id: i64, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// First day of the month currently in view.
    pub(crate) month: NaiveDate,

    // Dashboard
    pub(crate) summaries: Vec<CategorySummary>,
    pub(crate) series: Vec<DayBucket>,
    pub(crate) total_budget: Decimal,
    pub(crate) total_spent: Decimal,
    pub(crate) unattributed: Decimal,
    pub(crate) daily_average: Decimal,

    // Expenses
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) expense_filter_category: Option<i64>,
    pub(crate) expense_count: i64,

    // Categories
    pub(crate) categories: Vec<Category>,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let today = Local::now().date_naive();
        let month = today.with_day(1).unwrap_or(today);

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            month,

            summaries: Vec::new(),
            series: Vec::new(),
            total_budget: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            unattributed: Decimal::ZERO,
            daily_average: Decimal::ZERO,

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            expense_filter_category: None,
            expense_count: 0,

            categories: Vec::new(),
            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn window(&self) -> Window {
        Window::month_of(self.month)
    }

    pub(crate) fn month_label(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    /// `YYYY-MM` key used by the expense list query.
    pub(crate) fn month_key(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }

    pub(crate) fn step_month(&mut self, delta: i32) {
        let months = chrono::Months::new(delta.unsigned_abs());
        let next = if delta >= 0 {
            self.month.checked_add_months(months)
        } else {
            self.month.checked_sub_months(months)
        };
        if let Some(m) = next {
            self.month = m;
        }
    }

    /// Pulls a fresh snapshot and runs every aggregation for the viewed
    /// month. The engine works off in-memory slices, so one pair of
    /// queries feeds all the numbers.
    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        let categories = db.get_categories()?;
        let all_expenses = db.get_all_expenses()?;
        let window = self.window();

        self.summaries = aggregate::summarize(&categories, &all_expenses, window);
        self.series = aggregate::daily_series(&all_expenses, window);
        self.total_budget = aggregate::total_budget(&categories);
        self.total_spent = aggregate::total_spent(&categories, &all_expenses, window);
        self.unattributed = aggregate::unattributed_spend(&categories, &all_expenses, window);
        self.daily_average = aggregate::daily_average(self.total_spent, window);
        Ok(())
    }

    pub(crate) fn refresh_expenses(&mut self, db: &Database) -> Result<()> {
        let search = if self.search_input.is_empty() {
            None
        } else {
            Some(self.search_input.as_str())
        };
        self.expenses = db.get_expenses(
            Some(200),
            self.expense_filter_category,
            search,
            Some(&self.month_key()),
        )?;
        self.expense_count = db.get_expense_count()?;
        if self.expense_index >= self.expenses.len() && !self.expenses.is_empty() {
            self.expense_index = self.expenses.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_categories(&mut self, db: &Database) -> Result<()> {
        self.categories = db.get_categories()?;
        if self.category_index >= self.categories.len() && !self.categories.is_empty() {
            self.category_index = self.categories.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_categories(db)?;
        self.refresh_expenses(db)?;
        self.refresh_dashboard(db)?;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
