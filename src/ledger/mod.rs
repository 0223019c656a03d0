//! Derived, never-persisted views over the transaction list.

use rust_decimal::Decimal;

use crate::models::{BudgetLimit, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Filter {
    #[default]
    All,
    Income,
    Expense,
}

impl Filter {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn next(&self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expense,
            Self::Expense => Self::All,
        }
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.kind == TransactionType::Income,
            Self::Expense => txn.kind == TransactionType::Expense,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entries matching `filter`, in their original order.
pub(crate) fn filter_transactions(transactions: &[Transaction], filter: Filter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub(crate) total_income: Decimal,
    pub(crate) total_expenses: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) income_count: usize,
    pub(crate) expense_count: usize,
}

impl Summary {
    pub(crate) fn from_transactions(transactions: &[Transaction]) -> Result<Self, LedgerError> {
        let mut summary = transactions.iter().try_fold(Self::default(), |mut acc, t| {
            match t.kind {
                TransactionType::Income => {
                    acc.total_income = checked_total(acc.total_income, t.amount, "income")?;
                    acc.income_count += 1;
                }
                TransactionType::Expense => {
                    acc.total_expenses = checked_total(acc.total_expenses, t.amount, "expense")?;
                    acc.expense_count += 1;
                }
            }
            Ok::<_, LedgerError>(acc)
        })?;

        summary.balance = summary
            .total_income
            .checked_sub(summary.total_expenses)
            .ok_or_else(|| LedgerError::Overflow("balance".into()))?;
        Ok(summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum LedgerError {
    #[error("{0} total is too large to compute")]
    Overflow(String),
}

fn checked_total(total: Decimal, amount: Decimal, what: &str) -> Result<Decimal, LedgerError> {
    total
        .checked_add(amount)
        .ok_or_else(|| LedgerError::Overflow(what.to_string()))
}

/// Percentage above which a budget bar is drawn as a warning.
pub(crate) const WARNING_PERCENTAGE: u32 = 90;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategorySpend {
    pub(crate) category: String,
    pub(crate) spent: Decimal,
    pub(crate) limit: Decimal,
    /// `spent / limit * 100`, clamped to `[0, 100]`.
    pub(crate) percentage: Decimal,
}

impl CategorySpend {
    pub(crate) fn is_warning(&self) -> bool {
        self.percentage > Decimal::from(WARNING_PERCENTAGE)
    }

    /// Fill ratio in `[0.0, 1.0]` for drawing.
    pub(crate) fn ratio(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        (self.percentage / HUNDRED).to_f64().unwrap_or(0.0)
    }
}

/// Expense totals per budgeted category, in the order the limits are given.
pub(crate) fn budget_tracking(
    transactions: &[Transaction],
    limits: &[BudgetLimit],
) -> Result<Vec<CategorySpend>, LedgerError> {
    limits
        .iter()
        .map(|budget| {
            let spent = transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == budget.category)
                .try_fold(Decimal::ZERO, |acc, t| {
                    checked_total(acc, t.amount, &budget.category)
                })?;

            let percentage = if budget.limit > Decimal::ZERO {
                // Only a ratio far past the limit can overflow.
                spent
                    .checked_div(budget.limit)
                    .and_then(|ratio| ratio.checked_mul(HUNDRED))
                    .unwrap_or(HUNDRED)
                    .max(Decimal::ZERO)
                    .min(HUNDRED)
            } else {
                Decimal::ZERO
            };

            Ok(CategorySpend {
                category: budget.category.clone(),
                spent,
                limit: budget.limit,
                percentage,
            })
        })
        .collect()
}
