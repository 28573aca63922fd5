use anyhow::Result;
use rust_decimal::Decimal;

pub(crate) const DEFAULT_COLOR: &str = "#4CAF50";

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    /// Monthly allocation, same currency unit as expense amounts.
    pub budget: Decimal,
    /// Display-only; carried through untouched.
    pub color: String,
}

impl Category {
    pub fn new(name: String, budget: Decimal) -> Self {
        Self {
            id: None,
            name,
            budget,
            color: DEFAULT_COLOR.into(),
        }
    }

    /// Boundary validation: malformed categories never reach the
    /// aggregation engine.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Category name cannot be empty");
        }
        if self.budget < Decimal::ZERO {
            anyhow::bail!("Budget cannot be negative: {}", self.budget);
        }
        Ok(())
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id(categories: &[Category], id: i64) -> Option<&Category> {
        categories.iter().find(|c| c.id == Some(id))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
