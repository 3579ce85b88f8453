//! SQLite transaction store.

use crate::domain::error::FinanceError;
use crate::domain::settings::Settings;
use crate::domain::transaction::{
    format_timestamp, parse_timestamp, DatedAmount, Kind, NewTransaction, Transaction,
    DEFAULT_CATEGORIES,
};
use crate::ports::clock_port::{Clock, SystemClock};
use crate::ports::store_port::TransactionStore;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Row};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Upper bound on waiting for a pooled connection, including the first open.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(1);

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl SqliteStore {
    /// Opens (creating if needed) the store file named in `settings` and
    /// initializes its schema.
    pub fn from_settings(settings: &Settings) -> Result<Self, FinanceError> {
        let store = Self::open(&settings.store_path, settings.pool_size)?;
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn open(path: &Path, pool_size: u32) -> Result<Self, FinanceError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)?;
        tracing::debug!(path = %path.display(), pool_size, "opened sqlite store");

        Ok(Self {
            pool,
            clock: Box::new(SystemClock),
        })
    }

    pub fn in_memory() -> Result<Self, FinanceError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        Ok(Self {
            pool,
            clock: Box::new(SystemClock),
        })
    }

    /// Replaces the clock used to stamp inserted transactions.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, FinanceError> {
        Ok(self.pool.get()?)
    }

    /// Creates both tables and seeds the default categories. Safe to run on
    /// every start.
    pub fn initialize_schema(&self) -> Result<(), FinanceError> {
        let mut conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                note TEXT
            );
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );",
        )?;

        let tx = conn.transaction()?;
        for name in DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
                params![name],
            )?;
        }
        tx.commit()?;

        Ok(())
    }
}

fn kind_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Kind> {
    let raw: String = row.get(idx)?;
    raw.parse::<Kind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })
}

fn timestamp_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl TransactionStore for SqliteStore {
    fn insert(&self, new: &NewTransaction) -> Result<Transaction, FinanceError> {
        let mut conn = self.conn()?;
        let timestamp = self.clock.now();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO transactions (timestamp, kind, category, amount, note)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                format_timestamp(&timestamp),
                new.kind.as_str(),
                new.category,
                new.amount,
                new.note
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
            params![new.category],
        )?;
        tx.commit()?;

        tracing::info!(id, kind = %new.kind, category = %new.category, amount = new.amount, "inserted transaction");

        Ok(Transaction {
            id,
            timestamp,
            kind: new.kind,
            category: new.category.clone(),
            amount: new.amount,
            note: new.note.clone(),
        })
    }

    fn list_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, timestamp, kind, category, amount, note
             FROM transactions
             ORDER BY timestamp DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                timestamp: timestamp_from_column(row, 1)?,
                kind: kind_from_column(row, 2)?,
                category: row.get(3)?,
                amount: row.get(4)?,
                note: row.get(5)?,
            })
        })?;

        let transactions = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = transactions.len(), "listed transactions");
        Ok(transactions)
    }

    fn sum_by_type(&self) -> Result<BTreeMap<Kind, f64>, FinanceError> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare("SELECT kind, SUM(amount) FROM transactions GROUP BY kind")?;
        let rows = stmt.query_map([], |row| Ok((kind_from_column(row, 0)?, row.get(1)?)))?;

        let mut sums = BTreeMap::new();
        for row in rows {
            let (kind, total): (Kind, f64) = row?;
            sums.insert(kind, total);
        }
        Ok(sums)
    }

    fn dated_amounts(&self, kind: Kind) -> Result<Vec<DatedAmount>, FinanceError> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT timestamp, amount FROM transactions
             WHERE kind = ?1
             ORDER BY timestamp ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], |row| {
            Ok(DatedAmount::new(timestamp_from_column(row, 0)?, row.get(1)?))
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_categories(&self) -> Result<Vec<String>, FinanceError> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }
}
