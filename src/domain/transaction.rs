//! Transaction records and categories.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Storage format for transaction timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Categories seeded into a fresh store.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Food", "Transport", "Leisure", "Other"];

/// Direction of a transaction. Amounts are magnitudes; the sign comes from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "Income",
            Kind::Expense => "Expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// A stored transaction. Never mutated once written.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub kind: Kind,
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
}

/// A transaction as entered by the user, before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: Kind,
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
}

/// One `(timestamp, amount)` row of a single kind, as fed to the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedAmount {
    pub timestamp: NaiveDateTime,
    pub amount: f64,
}

impl DatedAmount {
    pub fn new(timestamp: NaiveDateTime, amount: f64) -> Self {
        Self { timestamp, amount }
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}
