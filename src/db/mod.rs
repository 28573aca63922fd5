mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (name, budget, color) VALUES (?1, ?2, ?3)",
            params![cat.name, cat.budget.to_string(), cat.color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, budget, color FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            let budget_str: String = row.get(2)?;
            Ok(Category {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                budget: Decimal::from_str(&budget_str).unwrap_or_default(),
                color: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, name, budget, color FROM categories WHERE id = ?1",
            params![id],
            |row| {
                let budget_str: String = row.get(2)?;
                Ok(Category {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    budget: Decimal::from_str(&budget_str).unwrap_or_default(),
                    color: row.get(3)?,
                })
            },
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn update_category(&self, cat: &Category) -> Result<()> {
        let id = cat
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a category without an id"))?;
        self.conn.execute(
            "UPDATE categories SET name = ?1, budget = ?2, color = ?3 WHERE id = ?4",
            params![cat.name, cat.budget.to_string(), cat.color, id],
        )?;
        Ok(())
    }

    /// Deletes only the category row. Its expenses stay behind and show up
    /// as unattributed spend.
    pub(crate) fn delete_category(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (category_id, amount, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.category_id,
                expense.amount.to_string(),
                expense.description,
                expense.date.format("%Y-%m-%d").to_string(),
                expense.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_expenses(
        &self,
        limit: Option<u32>,
        category_id: Option<i64>,
        search: Option<&str>,
        month: Option<&str>,
    ) -> Result<Vec<Expense>> {
        let mut sql = String::from(
            "SELECT e.id, e.category_id, e.amount, e.description, e.date, e.created_at
             FROM expenses e WHERE 1=1",
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(cid) = category_id {
            sql.push_str(&format!(" AND e.category_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(cid));
        }
        if let Some(s) = search {
            sql.push_str(&format!(
                " AND e.description LIKE ?{}",
                param_values.len() + 1
            ));
            param_values.push(Box::new(format!("%{s}%")));
        }
        if let Some(m) = month {
            sql.push_str(&format!(" AND e.date LIKE ?{}", param_values.len() + 1));
            param_values.push(Box::new(format!("{m}%")));
        }

        sql.push_str(" ORDER BY e.date DESC, e.id DESC");

        if let Some(l) = limit {
            sql.push_str(&format!(" LIMIT {l}"));
        }

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), Self::expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Full snapshot for the aggregation engine. No ordering guarantee is
    /// part of the contract; the engine does not rely on one.
    pub(crate) fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.category_id, e.amount, e.description, e.date, e.created_at
             FROM expenses e",
        )?;
        let rows = stmt.query_map([], Self::expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    pub(crate) fn update_expense_description(&self, expense_id: i64, description: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE expenses SET description = ?1 WHERE id = ?2",
            params![description, expense_id],
        )?;
        Ok(())
    }

    pub(crate) fn update_expense_category(&self, expense_id: i64, category_id: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE expenses SET category_id = ?1 WHERE id = ?2",
            params![category_id, expense_id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
        let amount_str: String = row.get(2)?;
        let date_str: String = row.get(4)?;
        Ok(Expense {
            id: Some(row.get(0)?),
            category_id: row.get(1)?,
            amount: Decimal::from_str(&amount_str).unwrap_or_default(),
            description: row.get(3)?,
            // Stored as YYYY-MM-DD; an unparseable row falls back to a
            // far-past date rather than poisoning the whole list.
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .unwrap_or(NaiveDate::MIN),
            created_at: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests;
