//! Core domain types and logic.

pub mod transaction;
pub mod aggregation;
pub mod validation;
pub mod settings;
pub mod error;
