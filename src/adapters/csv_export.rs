//! CSV export of the transaction history.

use crate::domain::error::FinanceError;
use crate::domain::transaction::{format_timestamp, Transaction};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    timestamp: String,
    kind: &'static str,
    category: &'a str,
    amount: f64,
    note: &'a str,
}

impl<'a> From<&'a Transaction> for HistoryRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            timestamp: format_timestamp(&tx.timestamp),
            kind: tx.kind.as_str(),
            category: &tx.category,
            amount: tx.amount,
            note: tx.note.as_deref().unwrap_or(""),
        }
    }
}

/// Writes one header row and one row per transaction, in the given order.
pub fn write_history<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), FinanceError> {
    let mut wtr = csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        wtr.write_record(["timestamp", "kind", "category", "amount", "note"])
            .map_err(csv_error)?;
    }
    for tx in transactions {
        wtr.serialize(HistoryRow::from(tx)).map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> FinanceError {
    FinanceError::Io(std::io::Error::other(format!("CSV write error: {}", e)))
}
