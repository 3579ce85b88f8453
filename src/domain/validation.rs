//! Transaction entry validation.
//!
//! Runs before anything is written; a failure means no transaction is stored.

use crate::domain::error::FinanceError;
use crate::domain::transaction::{Kind, NewTransaction};

pub fn validate_new_transaction(
    kind: Kind,
    category: &str,
    amount: Option<f64>,
    note: Option<&str>,
) -> Result<NewTransaction, FinanceError> {
    let category = validate_category(category)?;
    let amount = validate_amount(amount)?;
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(NewTransaction {
        kind,
        category,
        amount,
        note,
    })
}

fn validate_category(category: &str) -> Result<String, FinanceError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(FinanceError::Validation {
            field: "category".to_string(),
            reason: "category is required".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

// A zero amount counts as omitted.
fn validate_amount(amount: Option<f64>) -> Result<f64, FinanceError> {
    let value = match amount {
        Some(v) if v != 0.0 => v,
        _ => {
            return Err(FinanceError::Validation {
                field: "amount".to_string(),
                reason: "amount is required".to_string(),
            });
        }
    };
    if !value.is_finite() {
        return Err(FinanceError::Validation {
            field: "amount".to_string(),
            reason: "amount must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(FinanceError::Validation {
            field: "amount".to_string(),
            reason: "amount must be non-negative; use the kind for direction".to_string(),
        });
    }
    Ok(value)
}
