mod category;
mod expense;

pub use category::Category;
pub use expense::Expense;

#[cfg(test)]
mod tests;
