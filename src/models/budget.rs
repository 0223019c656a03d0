use rust_decimal::Decimal;
use serde::Deserialize;

/// Spending ceiling for one expense category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct BudgetLimit {
    pub(crate) category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) limit: Decimal,
}

impl BudgetLimit {
    pub(crate) fn new(category: impl Into<String>, limit: Decimal) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }

    /// Find a limit by category name (case-insensitive) in a slice.
    pub(crate) fn find<'a>(limits: &'a [BudgetLimit], category: &str) -> Option<&'a BudgetLimit> {
        let lower = category.to_lowercase();
        limits.iter().find(|l| l.category.to_lowercase() == lower)
    }

    pub(crate) fn defaults() -> Vec<BudgetLimit> {
        vec![
            Self::new("food", Decimal::from(500)),
            Self::new("rent", Decimal::from(1200)),
            Self::new("utilities", Decimal::from(300)),
            Self::new("entertainment", Decimal::from(200)),
            Self::new("other", Decimal::from(400)),
        ]
    }
}
