//! Runtime settings resolved from configuration, with validation.

use crate::domain::error::FinanceError;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

/// Store file name, resolved against the working directory.
pub const DEFAULT_STORE_PATH: &str = "finances.db";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_CHART_WIDTH: f64 = 500.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 300.0;

/// Space reserved on each side of a chart's plot area.
pub const CHART_PADDING: f64 = 50.0;
/// Charts at or below this width or height have no plot area left.
pub const MIN_CHART_SIZE: f64 = 2.0 * CHART_PADDING;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_path: PathBuf,
    pub pool_size: u32,
    pub log_filter: String,
    pub log_ansi: bool,
    pub chart_width: f64,
    pub chart_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            pool_size: 1,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_ansi: false,
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl Settings {
    /// Resolves settings from `config`. Absent keys take their defaults; a key
    /// that is present but unparseable or out of range is `ConfigInvalid`.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FinanceError> {
        let store_path = config
            .get_string("store", "path")
            .map(|p| p.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());
        if store_path.is_empty() {
            return Err(invalid("store", "path", "path must not be empty"));
        }

        let pool_size = typed("store", "pool_size", config.get_int("store", "pool_size"))?
            .unwrap_or(1);
        let pool_size = u32::try_from(pool_size)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| invalid("store", "pool_size", "pool_size must be at least 1"))?;

        let log_filter = config
            .get_string("logging", "filter")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_ansi = typed("logging", "ansi", config.get_bool("logging", "ansi"))?
            .unwrap_or(false);

        let chart_width = chart_dimension(config, "width", DEFAULT_CHART_WIDTH)?;
        let chart_height = chart_dimension(config, "height", DEFAULT_CHART_HEIGHT)?;

        Ok(Settings {
            store_path: PathBuf::from(store_path),
            pool_size,
            log_filter,
            log_ansi,
            chart_width,
            chart_height,
        })
    }
}

fn chart_dimension(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, FinanceError> {
    let value = typed("chart", key, config.get_double("chart", key))?.unwrap_or(default);
    if value.is_finite() && value > MIN_CHART_SIZE {
        Ok(value)
    } else {
        Err(invalid(
            "chart",
            key,
            &format!("{key} must be greater than {MIN_CHART_SIZE}"),
        ))
    }
}

fn typed<T>(
    section: &str,
    key: &str,
    value: Result<Option<T>, String>,
) -> Result<Option<T>, FinanceError> {
    value.map_err(|reason| invalid(section, key, &reason))
}

fn invalid(section: &str, key: &str, reason: &str) -> FinanceError {
    FinanceError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
