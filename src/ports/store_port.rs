//! Transaction store port trait.

use crate::domain::aggregation::summarize_by_type;
use crate::domain::error::FinanceError;
use crate::domain::transaction::{DatedAmount, Kind, NewTransaction, Transaction};
use std::collections::BTreeMap;

/// Durable append-only log of transactions plus the category lookup table.
///
/// One process, one writer: implementations need no locking beyond what the
/// backing store gives for free.
pub trait TransactionStore {
    /// Stores `new` with a store-assigned timestamp and records its category.
    fn insert(&self, new: &NewTransaction) -> Result<Transaction, FinanceError>;

    /// All transactions, most recent first.
    fn list_all(&self) -> Result<Vec<Transaction>, FinanceError>;

    fn list_categories(&self) -> Result<Vec<String>, FinanceError>;

    /// Total amount per kind. Empty when there are no transactions.
    ///
    /// Default implementation: groups [`list_all`](Self::list_all) in memory.
    fn sum_by_type(&self) -> Result<BTreeMap<Kind, f64>, FinanceError> {
        let records: Vec<(Kind, f64)> = self
            .list_all()?
            .iter()
            .map(|tx| (tx.kind, tx.amount))
            .collect();
        Ok(summarize_by_type(&records))
    }

    /// `(timestamp, amount)` rows of one kind, oldest first.
    fn dated_amounts(&self, kind: Kind) -> Result<Vec<DatedAmount>, FinanceError> {
        let mut rows: Vec<DatedAmount> = self
            .list_all()?
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| DatedAmount::new(tx.timestamp, tx.amount))
            .collect();
        rows.reverse();
        Ok(rows)
    }
}
