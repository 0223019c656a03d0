mod budget;
pub(crate) mod category;
mod transaction;

pub(crate) use budget::BudgetLimit;
pub(crate) use transaction::{
    Transaction, TransactionDraft, TransactionId, TransactionType, ValidationError, DATE_FORMAT,
    MAX_AMOUNT,
};
