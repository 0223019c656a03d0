use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Storage format for `Transaction::date`.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount accepted at entry or read back from storage (one trillion).
///
/// Any ledger of such entries sums well inside `Decimal`'s range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }

    pub(crate) fn toggle(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque lookup key of a ledger entry.
///
/// New ids are random UUIDs. Anything non-empty read back from storage is
/// accepted as-is, so older timestamp ids keep working for deletes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct TransactionId(String);

impl TransactionId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: TransactionId,
    pub(crate) description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub(crate) amount: Decimal,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
}

impl Transaction {
    pub(crate) fn new(
        description: String,
        amount: Decimal,
        kind: TransactionType,
        category: String,
        date: String,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            description,
            amount,
            kind,
            category,
            date,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Whether the amount's magnitude is within `MAX_AMOUNT`.
    pub(crate) fn amount_in_range(&self) -> bool {
        self.amount.abs() <= MAX_AMOUNT
    }

    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Amount must be a non-negative number, got '{0}'")]
    InvalidAmount(String),
    #[error("Amount must be at most 1,000,000,000,000, got '{0}'")]
    AmountTooLarge(String),
    #[error("Date must be YYYY-MM-DD, got '{0}'")]
    InvalidDate(String),
}

/// Raw entry input, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionDraft {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
    pub(crate) date: String,
}

impl TransactionDraft {
    /// Turn the draft into a ledger entry with a fresh id.
    pub(crate) fn validate(&self) -> Result<Transaction, ValidationError> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let date = self.date.trim();

        if description.is_empty() || amount.is_empty() || date.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let parsed = parse_amount(amount)
            .ok_or_else(|| ValidationError::InvalidAmount(amount.to_string()))?;
        if parsed > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(amount.to_string()));
        }

        if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            return Err(ValidationError::InvalidDate(date.to_string()));
        }

        Ok(Transaction::new(
            description.to_string(),
            parsed,
            self.kind,
            self.category.trim().to_string(),
            date.to_string(),
        ))
    }
}

/// Parse a user-entered amount. Accepts an optional currency sign and
/// thousands separators; rejects negatives.
pub(crate) fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned = input.trim().trim_start_matches('$').replace(',', "");
    let amount = Decimal::from_str(cleaned.trim()).ok()?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    Some(amount.abs())
}
