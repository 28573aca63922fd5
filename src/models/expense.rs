use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Expense {
    pub id: Option<i64>,
    /// May dangle: deleting a category leaves its expenses in place.
    /// Aggregation reports such spend as unattributed.
    pub category_id: i64,
    pub amount: Decimal,
    pub description: String,
    /// Calendar date; time-of-day does not exist in the model.
    pub date: NaiveDate,
    pub created_at: String,
}

impl Expense {
    pub fn new(category_id: i64, amount: Decimal, description: String, date: NaiveDate) -> Self {
        Self {
            id: None,
            category_id,
            amount,
            description,
            date,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Minimum recordable amount: one cent.
    pub fn min_amount() -> Decimal {
        Decimal::new(1, 2)
    }

    /// Boundary validation: malformed expenses never reach the
    /// aggregation engine.
    pub fn validate(&self) -> Result<()> {
        if self.amount < Self::min_amount() {
            anyhow::bail!("Amount must be at least $0.01, got {}", self.amount);
        }
        Ok(())
    }
}
