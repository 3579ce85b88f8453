//! Domain error types.

/// Top-level error type for fintrack.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no data for {report}")]
    NoData { report: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FinanceError {
    pub fn no_data(report: &str) -> Self {
        FinanceError::NoData {
            report: report.to_string(),
        }
    }

    /// Empty-data conditions are informational, not failures.
    pub fn is_no_data(&self) -> bool {
        matches!(self, FinanceError::NoData { .. })
    }
}

impl From<rusqlite::Error> for FinanceError {
    fn from(e: rusqlite::Error) -> Self {
        FinanceError::DatabaseQuery {
            reason: e.to_string(),
        }
    }
}

impl From<r2d2::Error> for FinanceError {
    fn from(e: r2d2::Error) -> Self {
        FinanceError::Database {
            reason: e.to_string(),
        }
    }
}

impl From<&FinanceError> for std::process::ExitCode {
    fn from(err: &FinanceError) -> Self {
        let code: u8 = match err {
            FinanceError::Io(_) => 1,
            FinanceError::ConfigParse { .. } | FinanceError::ConfigInvalid { .. } => 2,
            FinanceError::Database { .. } | FinanceError::DatabaseQuery { .. } => 3,
            FinanceError::Validation { .. } => 4,
            FinanceError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
