//! Port traits (hexagonal architecture boundaries).

pub mod store_port;
pub mod config_port;
pub mod clock_port;
