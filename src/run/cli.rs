use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::aggregate::{self, Window};
use crate::db::Database;
use crate::models::{Category, Expense};
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "categories" => cli_categories(db),
        "add" => cli_add(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("outlay {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Outlay: local-only budget tracker");
    println!();
    println!("Usage: outlay [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Print monthly budget summary");
    println!("  categories                    List categories with budgets");
    println!("  add <category> <amount> [description]");
    println!("                                Record an expense dated today");
    println!("    --date <YYYY-MM-DD>         Override the expense date");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn parse_month(arg: Option<&String>) -> Result<Window> {
    let first = match arg {
        Some(m) => NaiveDate::parse_from_str(&format!("{m}-01"), "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid month '{m}'. Use YYYY-MM (e.g. 2024-01)"))?,
        None => {
            let today = Local::now().date_naive();
            today.with_day(1).unwrap_or(today)
        }
    };
    Ok(Window::month_of(first))
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let window = parse_month(args.first().filter(|a| !a.starts_with('-')))?;

    let categories = db.get_categories()?;
    let expenses = db.get_all_expenses()?;

    let summaries = aggregate::summarize(&categories, &expenses, window);
    let total_budget = aggregate::total_budget(&categories);
    let total_spent = aggregate::total_spent(&categories, &expenses, window);
    let unattributed = aggregate::unattributed_spend(&categories, &expenses, window);
    let daily_avg = aggregate::daily_average(total_spent, window);

    println!("Outlay: {window}");
    println!("{}", "─".repeat(60));
    println!("  Total Budget: {}", format_amount(total_budget));
    println!("  Spent:        {}", format_amount(total_spent));
    println!("  Remaining:    {}", format_amount(total_budget - total_spent));
    println!("  Daily Avg:    {}", format_amount(daily_avg));
    if unattributed > Decimal::ZERO {
        println!("  Unattributed: {}", format_amount(unattributed));
    }

    if !summaries.is_empty() {
        println!();
        println!("By Category:");
        for s in &summaries {
            let marker = if s.over_budget { "  OVER" } else { "" };
            println!(
                "  {:<20} {:>12} / {:<12} {:>7}{marker}",
                s.name,
                format_amount(s.spent),
                format_amount(s.budget),
                format_percent(s.percentage),
            );
        }
    }

    Ok(())
}

fn cli_categories(db: &mut Database) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<4} {:<20} {:<14} Color", "ID", "Name", "Budget");
    println!("{}", "─".repeat(50));
    for cat in &categories {
        println!(
            "{:<4} {:<20} {:<14} {}",
            cat.id.unwrap_or(0),
            cat.name,
            format_amount(cat.budget),
            cat.color,
        );
    }
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: outlay add <category> <amount> [description] [--date YYYY-MM-DD]");
    }

    // Pull out --date before positional parsing
    let date = match args.windows(2).find(|w| w[0] == "--date") {
        Some(w) => NaiveDate::parse_from_str(&w[1], "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Use YYYY-MM-DD", w[1]))?,
        None => Local::now().date_naive(),
    };
    let positional: Vec<&String> = {
        let mut skip_next = false;
        args.iter()
            .filter(|a| {
                if skip_next {
                    skip_next = false;
                    return false;
                }
                if *a == "--date" {
                    skip_next = true;
                    return false;
                }
                true
            })
            .collect()
    };

    // First numeric token is the amount; everything before it is the
    // category name, everything after it the description.
    let amount_pos = positional
        .iter()
        .position(|a| Decimal::from_str(a).is_ok())
        .filter(|&p| p > 0)
        .ok_or_else(|| {
            anyhow::anyhow!("Usage: outlay add <category> <amount> [description]")
        })?;

    let category_name = positional[..amount_pos]
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let amount = Decimal::from_str(positional[amount_pos]).unwrap_or_default();
    let description = positional[amount_pos + 1..]
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let categories = db.get_categories()?;
    let cat = Category::find_by_name(&categories, &category_name)
        .ok_or_else(|| anyhow::anyhow!("Category '{category_name}' not found"))?;
    let cat_id = cat
        .id
        .ok_or_else(|| anyhow::anyhow!("Category has no ID"))?;

    let expense = Expense::new(cat_id, amount, description, date);
    expense.validate()?;
    db.insert_expense(&expense)?;

    println!("Added {} to {} on {date}", format_amount(amount), cat.name);
    Ok(())
}
