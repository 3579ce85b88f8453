//! Aggregation engine: balance, rating, phrase selection and expense projection.
//!
//! Every function here is a stateless computation over records already fetched
//! from the store. Callers guard empty result sets before charting or projecting.

use super::error::FinanceError;
use super::transaction::{DatedAmount, Kind};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Number of days covered by the expense projection.
pub const PROJECTION_DAYS: u32 = 30;

pub const MOTIVATIONAL_PHRASES: [&str; 5] = [
    "The key to saving is getting started.",
    "Spending less is not a limitation, it is a strategy.",
    "Every cent counts toward your financial success.",
    "Invest in your dreams, not in your impulses.",
    "Financial discipline today is freedom tomorrow.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRating {
    pub severity: Severity,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseProjection {
    pub daily_average: f64,
    pub projection: f64,
    /// Days that contributed to the average.
    pub active_days: usize,
}

/// Income total minus expense total. A missing kind contributes 0.
pub fn compute_balance(sums_by_type: &BTreeMap<Kind, f64>) -> f64 {
    let income = sums_by_type.get(&Kind::Income).copied().unwrap_or(0.0);
    let expense = sums_by_type.get(&Kind::Expense).copied().unwrap_or(0.0);
    income - expense
}

/// Three-way rating with the boundary at exactly zero.
///
/// `balance` must not be NaN; validated amounts are always finite.
pub fn classify_balance(balance: f64) -> BalanceRating {
    debug_assert!(!balance.is_nan(), "balance must not be NaN");
    if balance > 0.0 {
        BalanceRating {
            severity: Severity::Positive,
            message: "Excellent work! Keep up this pace.",
        }
    } else if balance == 0.0 {
        BalanceRating {
            severity: Severity::Neutral,
            message: "You are breaking even. Could you save a little more?",
        }
    } else {
        BalanceRating {
            severity: Severity::Negative,
            message: "Careful! You are spending more than you earn.",
        }
    }
}

/// Uniform pick from `phrases`. Returns `None` only when the list is empty.
pub fn pick_motivational_phrase<'a, R: Rng + ?Sized>(
    phrases: &[&'a str],
    rng: &mut R,
) -> Option<&'a str> {
    phrases.choose(rng).copied()
}

/// Sum of amounts per calendar date, time of day discarded.
pub fn daily_totals(records: &[DatedAmount]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.timestamp.date()).or_insert(0.0) += record.amount;
    }
    totals
}

/// Mean of per-day expense sums over the days that have at least one expense,
/// and that mean times [`PROJECTION_DAYS`].
///
/// Days without expenses are not counted as zeros. An empty input is rejected
/// with [`FinanceError::NoData`] rather than dividing by zero.
pub fn project_expenses(records: &[DatedAmount]) -> Result<ExpenseProjection, FinanceError> {
    let totals = daily_totals(records);
    if totals.is_empty() {
        return Err(FinanceError::no_data("expense projection"));
    }

    let active_days = totals.len();
    let daily_average = totals.values().sum::<f64>() / active_days as f64;

    Ok(ExpenseProjection {
        daily_average,
        projection: daily_average * PROJECTION_DAYS as f64,
        active_days,
    })
}

/// Grouped sum of amounts per kind. Kinds with no records are absent.
pub fn summarize_by_type(records: &[(Kind, f64)]) -> BTreeMap<Kind, f64> {
    let mut sums = BTreeMap::new();
    for (kind, amount) in records {
        *sums.entry(*kind).or_insert(0.0) += amount;
    }
    sums
}

pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}
