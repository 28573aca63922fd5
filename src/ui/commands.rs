use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::{Category, Expense};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Outlay", cmd_quit, r);
    register_command!("quit", "Quit Outlay", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "category",
        "Create category (e.g. :category Groceries 500)",
        cmd_category,
        r
    );
    register_command!(
        "budget",
        "Set a category's budget (e.g. :budget Groceries 600)",
        cmd_budget,
        r
    );
    register_command!(
        "color",
        "Set a category's color (e.g. :color Groceries #FF5722)",
        cmd_color,
        r
    );
    register_command!(
        "rename-category",
        "Rename selected category (e.g. :rename-category Food)",
        cmd_rename_category,
        r
    );
    register_command!(
        "delete-category",
        "Delete selected category (its expenses become unattributed)",
        cmd_delete_category,
        r
    );
    register_command!(
        "expense",
        "Add expense (e.g. :expense Groceries 42.50 weekly shop)",
        cmd_expense,
        r
    );
    register_command!(
        "x",
        "Add expense (e.g. :x Groceries 42.50 weekly shop)",
        cmd_expense,
        r
    );
    register_command!("delete-expense", "Delete selected expense", cmd_delete_expense, r);
    register_command!("rename", "Rename selected expense", cmd_rename, r);
    register_command!(
        "recat",
        "Re-categorize selected expense (e.g. :recat Dining)",
        cmd_recat,
        r
    );
    register_command!("search", "Search expenses (e.g. :search coffee)", cmd_search, r);
    register_command!("s", "Search expenses (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "filter",
        "Filter expenses by category (e.g. :filter Groceries)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter expenses by category", cmd_filter, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)?;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_categories(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Viewing {}", app.month_label()));
        return Ok(());
    }

    // Accept formats like "2024-01", "2024-1", "01", "1"
    let month = if args.len() <= 2 {
        let year = app.month.format("%Y").to_string();
        format!("{year}-{args:0>2}")
    } else {
        args.to_string()
    };

    if let Ok(date) = chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d") {
        app.month = date;
        app.refresh_all(db)?;
        app.set_status(format!("Switched to {}", app.month_label()));
    } else {
        app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)");
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, -1)
}

fn advance_month(app: &mut App, db: &mut Database, delta: i32) -> anyhow::Result<()> {
    app.step_month(delta);
    app.refresh_all(db)?;
    app.set_status(format!("Month: {}", app.month_label()));
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name> [budget]. Example: :category Groceries 500");
        return Ok(());
    }

    // Last token may be a budget amount, everything before is the name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    let (name, budget) = if parts.len() == 2 {
        match Decimal::from_str(parts[0]) {
            Ok(b) => (parts[1].to_string(), b),
            Err(_) => (args.to_string(), Decimal::ZERO),
        }
    } else {
        (args.to_string(), Decimal::ZERO)
    };

    let cat = Category::new(name.clone(), budget);
    if let Err(e) = cat.validate() {
        app.set_status(format!("{e}"));
        return Ok(());
    }

    db.insert_category(&cat)?;
    app.refresh_categories(db)?;
    app.refresh_dashboard(db)?;
    app.set_status(format!("Created category: {name}"));
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :budget <category_name> <amount>. Example: :budget Groceries 600");
        return Ok(());
    }

    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category_name> <amount>");
        return Ok(());
    }

    let amount_str = parts[0];
    let category_name = parts[1];

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let categories = db.get_categories()?;
    if let Some(cat) = Category::find_by_name(&categories, category_name) {
        let mut edited = cat.clone();
        edited.budget = amount;
        if let Err(e) = edited.validate() {
            app.set_status(format!("{e}"));
            return Ok(());
        }
        db.update_category(&edited)?;
        app.refresh_categories(db)?;
        app.refresh_dashboard(db)?;
        app.set_status(format!("Budget set: {} = ${amount}", edited.name));
    } else {
        app.set_status(format!("Category '{category_name}' not found"));
    }

    Ok(())
}

fn cmd_color(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :color <category_name> <#hex>. Example: :color Groceries #FF5722");
        return Ok(());
    }

    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :color <category_name> <#hex>");
        return Ok(());
    }

    let color = parts[0];
    let category_name = parts[1];

    let categories = db.get_categories()?;
    if let Some(cat) = Category::find_by_name(&categories, category_name) {
        let mut edited = cat.clone();
        edited.color = color.to_string();
        db.update_category(&edited)?;
        app.refresh_categories(db)?;
        app.set_status(format!("Color set: {} = {color}", edited.name));
    } else {
        app.set_status(format!("Category '{category_name}' not found"));
    }

    Ok(())
}

fn cmd_rename_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Categories || app.categories.is_empty() {
        app.set_status("Navigate to Categories and select one first");
        return Ok(());
    }

    if args.is_empty() {
        app.set_status("Usage: :rename-category <new_name>");
        return Ok(());
    }

    if let Some(cat) = app.categories.get(app.category_index) {
        let mut edited = cat.clone();
        edited.name = args.to_string();
        if let Err(e) = edited.validate() {
            app.set_status(format!("{e}"));
            return Ok(());
        }
        db.update_category(&edited)?;
        app.refresh_categories(db)?;
        app.refresh_dashboard(db)?;
        app.set_status(format!("Renamed category to: {args}"));
    }

    Ok(())
}

fn cmd_delete_category(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Categories || app.categories.is_empty() {
        app.set_status("Navigate to Categories and select one first");
        return Ok(());
    }

    if let Some(cat) = app.categories.get(app.category_index) {
        if let Some(id) = cat.id {
            let name = cat.name.clone();
            app.confirm_message =
                format!("Delete '{name}'? Its expenses will become unattributed.");
            app.pending_action = Some(PendingAction::DeleteCategory { id, name });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_expense(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(
            "Usage: :expense <category> <amount> [description]. Example: :expense Groceries 42.50 weekly shop",
        );
        return Ok(());
    }

    // An optional leading YYYY-MM-DD overrides today's date. After that the
    // first numeric token is the amount; tokens before it form the category
    // name, tokens after it the description.
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    let date = match tokens
        .first()
        .and_then(|t| chrono::NaiveDate::parse_from_str(t, "%Y-%m-%d").ok())
    {
        Some(d) => {
            tokens.remove(0);
            d
        }
        None => chrono::Local::now().date_naive(),
    };

    let amount_pos = tokens.iter().position(|t| Decimal::from_str(t).is_ok());
    let Some(pos) = amount_pos.filter(|&p| p > 0) else {
        app.set_status("Usage: :expense <category> <amount> [description]");
        return Ok(());
    };

    let category_name = tokens[..pos].join(" ");
    let amount = Decimal::from_str(tokens[pos]).unwrap_or_default();
    let description = tokens[pos + 1..].join(" ");

    let categories = db.get_categories()?;
    let Some(cat) = Category::find_by_name(&categories, &category_name) else {
        app.set_status(format!("Category '{category_name}' not found"));
        return Ok(());
    };
    let Some(cat_id) = cat.id else {
        app.set_status("Category has no ID (this shouldn't happen)");
        return Ok(());
    };

    let expense = Expense::new(cat_id, amount, description.clone(), date);
    if let Err(e) = expense.validate() {
        app.set_status(format!("{e}"));
        return Ok(());
    }

    db.insert_expense(&expense)?;
    app.refresh_expenses(db)?;
    app.refresh_dashboard(db)?;
    app.set_status(format!("Added expense: ${amount} to {}", cat.name));
    Ok(())
}

fn cmd_delete_expense(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.expenses.get(app.expense_index) {
        if let Some(id) = expense.id {
            let desc = if expense.description.is_empty() {
                format!("${}", expense.amount)
            } else {
                expense.description.clone()
            };
            app.confirm_message = format!("Delete '{desc}'?");
            app.pending_action = Some(PendingAction::DeleteExpense {
                id,
                description: desc,
            });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if args.is_empty() {
        app.set_status("Usage: :rename <new_description>");
        return Ok(());
    }

    if let Some(expense) = app.expenses.get(app.expense_index) {
        if let Some(id) = expense.id {
            db.update_expense_description(id, args)?;
            app.refresh_expenses(db)?;
            app.set_status(format!("Renamed expense to: {args}"));
        }
    }

    Ok(())
}

fn cmd_recat(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if args.is_empty() {
        app.set_status("Usage: :recat <category_name>");
        return Ok(());
    }

    let categories = db.get_categories()?;

    // Try name match first, then ID match
    let cat = Category::find_by_name(&categories, args).or_else(|| {
        args.parse::<i64>()
            .ok()
            .and_then(|id| Category::find_by_id(&categories, id))
    });

    if let Some(cat) = cat {
        let Some(cat_id) = cat.id else {
            app.set_status("Category has no ID (this shouldn't happen)");
            return Ok(());
        };
        if let Some(expense) = app.expenses.get(app.expense_index) {
            if let Some(id) = expense.id {
                db.update_expense_category(id, cat_id)?;
                app.refresh_expenses(db)?;
                app.refresh_dashboard(db)?;
                app.set_status(format!("Categorized as: {}", cat.name));
            }
        }
    } else {
        app.set_status(format!("Category '{args}' not found"));
    }

    Ok(())
}

fn cmd_search(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }

    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.expense_filter_category = None;
        app.screen = Screen::Expenses;
        app.refresh_expenses(db)?;
        app.set_status("Category filter cleared - showing all expenses");
        return Ok(());
    }

    let categories = db.get_categories()?;
    if let Some(cat) = Category::find_by_name(&categories, args) {
        app.expense_filter_category = cat.id;
        app.screen = Screen::Expenses;
        app.expense_index = 0;
        app.expense_scroll = 0;
        app.refresh_expenses(db)?;
        app.set_status(format!("Filtering by category: {}", cat.name));
    } else {
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        app.set_status(format!("Category not found. Available: {}", names.join(", ")));
    }

    Ok(())
}
