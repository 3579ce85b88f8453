//! fintrack — single-user personal finance tracker.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The [`cli`] module is the shell that
//! reads the store and pipes query results through [`domain::aggregation`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
