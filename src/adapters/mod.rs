//! Concrete adapter implementations for ports.

pub mod sqlite_adapter;
pub mod file_config_adapter;
pub mod chart_svg;
pub mod csv_export;
