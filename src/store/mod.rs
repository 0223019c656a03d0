//! Persistence boundary for the ledger.
//!
//! The whole transaction list lives in a single JSON array under one
//! well-known key. Every mutation is a full read-modify-write of that record;
//! there is exactly one writer (the UI thread or a single CLI invocation).

mod memory;
mod schema;
mod sqlite;

pub(crate) use memory::MemoryKv;
pub(crate) use sqlite::SqliteKv;

use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionId};

/// Key under which the serialized transaction list is stored.
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";

/// String key-value substrate (the localStorage contract).
pub(crate) trait KeyValue {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("stored '{key}' record is not a valid transaction list: {source} (run `pocketbook reset` to start over)")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored transaction '{id}' has amount {amount}, beyond the 1,000,000,000,000 limit (run `pocketbook reset` to start over)")]
    OutOfRange { id: TransactionId, amount: Decimal },
    #[error("failed to encode transaction list: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("storage backend failure: {0:#}")]
    Backend(anyhow::Error),
}

impl From<anyhow::Error> for StoreError {
    fn from(e: anyhow::Error) -> Self {
        Self::Backend(e)
    }
}

pub(crate) type StoreResult<T> = std::result::Result<T, StoreError>;

pub(crate) struct Store {
    kv: Box<dyn KeyValue>,
}

impl Store {
    /// Wrap a substrate, seeding an empty list on first use.
    pub(crate) fn new(kv: impl KeyValue + 'static) -> StoreResult<Self> {
        let mut store = Self { kv: Box::new(kv) };
        if store.kv.get(TRANSACTIONS_KEY)?.is_none() {
            tracing::debug!("No ledger record yet, seeding an empty one");
            store.write(&[])?;
        }
        Ok(store)
    }

    /// All stored transactions in insertion order.
    ///
    /// A missing record reads as an empty ledger. A record that does not parse,
    /// or holds an amount past `MAX_AMOUNT`, is an error: falling back to empty
    /// here would let the next write overwrite the user's data.
    pub(crate) fn get_transactions(&self) -> StoreResult<Vec<Transaction>> {
        let Some(raw) = self.kv.get(TRANSACTIONS_KEY)? else {
            return Ok(Vec::new());
        };
        let transactions: Vec<Transaction> = serde_json::from_str(&raw).map_err(|source| {
            tracing::error!(key = TRANSACTIONS_KEY, %source, "Stored ledger is malformed");
            StoreError::Corrupt {
                key: TRANSACTIONS_KEY.to_string(),
                source,
            }
        })?;

        if let Some(bad) = transactions.iter().find(|t| !t.amount_in_range()) {
            tracing::error!(id = %bad.id, amount = %bad.amount, "Stored amount out of range");
            return Err(StoreError::OutOfRange {
                id: bad.id.clone(),
                amount: bad.amount,
            });
        }
        Ok(transactions)
    }

    pub(crate) fn add_transaction(&mut self, txn: &Transaction) -> StoreResult<()> {
        let mut transactions = self.get_transactions()?;
        transactions.push(txn.clone());
        self.write(&transactions)?;
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "Transaction added");
        Ok(())
    }

    /// Drop every entry with `id`. A miss is not an error.
    ///
    /// Returns how many entries were removed.
    pub(crate) fn remove_transaction(&mut self, id: &TransactionId) -> StoreResult<usize> {
        let transactions = self.get_transactions()?;
        let before = transactions.len();
        let remaining: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| &t.id != id)
            .collect();
        let removed = before - remaining.len();
        self.write(&remaining)?;
        if removed == 0 {
            tracing::warn!(%id, "Remove requested for unknown transaction");
        } else {
            tracing::info!(%id, removed, "Transaction removed");
        }
        Ok(removed)
    }

    /// Replace the record with an empty list, whatever it held before.
    pub(crate) fn clear(&mut self) -> StoreResult<()> {
        self.write(&[])?;
        tracing::info!("Ledger reset");
        Ok(())
    }

    fn write(&mut self, transactions: &[Transaction]) -> StoreResult<()> {
        let raw = serde_json::to_string(transactions).map_err(StoreError::Encode)?;
        self.kv.set(TRANSACTIONS_KEY, &raw)?;
        Ok(())
    }
}
