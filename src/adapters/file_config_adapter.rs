//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_string(&content).map_err(std::io::Error::other)
    }

    /// A configuration with no sections; every lookup is absent.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
        self.config
            .getint(section, key)
            .map_err(|e| format!("expected an integer: {e}"))
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, String> {
        self.config
            .getfloat(section, key)
            .map_err(|e| format!("expected a number: {e}"))
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, String> {
        match self.config.get(section, key) {
            None => Ok(None),
            Some(value) => Self::parse_bool(&value)
                .map(Some)
                .ok_or_else(|| format!("expected true or false, got `{value}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[store]
path = /var/lib/fintrack/finances.db
pool_size = 1

[logging]
filter = fintrack=debug
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("store", "path"),
            Some("/var/lib/fintrack/finances.db".to_string())
        );
        assert_eq!(
            adapter.get_string("logging", "filter"),
            Some("fintrack=debug".to_string())
        );
    }

    #[test]
    fn empty_config_has_no_values() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("store", "path"), None);
        assert_eq!(adapter.get_int("store", "pool_size"), Ok(None));
        assert_eq!(adapter.get_double("chart", "width"), Ok(None));
        assert_eq!(adapter.get_bool("logging", "ansi"), Ok(None));
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[store]\npath = a.db\n").unwrap();
        assert_eq!(adapter.get_string("store", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[store]\npool_size = 3\n").unwrap();
        assert_eq!(adapter.get_int("store", "pool_size"), Ok(Some(3)));
    }

    #[test]
    fn get_int_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[store]\npool_size = abc\n").unwrap();
        let reason = adapter.get_int("store", "pool_size").unwrap_err();
        assert!(reason.starts_with("expected an integer"));
    }

    #[test]
    fn get_double_returns_value() {
        let adapter = FileConfigAdapter::from_string("[chart]\nwidth = 640.5\n").unwrap();
        assert_eq!(adapter.get_double("chart", "width"), Ok(Some(640.5)));
    }

    #[test]
    fn get_double_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[chart]\nwidth = wide\n").unwrap();
        assert!(adapter.get_double("chart", "width").is_err());
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[logging]\na = true\nb = yes\nc = 0\nd = Off\n")
                .unwrap();
        assert_eq!(adapter.get_bool("logging", "a"), Ok(Some(true)));
        assert_eq!(adapter.get_bool("logging", "b"), Ok(Some(true)));
        assert_eq!(adapter.get_bool("logging", "c"), Ok(Some(false)));
        assert_eq!(adapter.get_bool("logging", "d"), Ok(Some(false)));
        assert_eq!(adapter.get_bool("logging", "missing"), Ok(None));
    }

    #[test]
    fn get_bool_rejects_unknown_spelling() {
        let adapter = FileConfigAdapter::from_string("[logging]\nansi = maybe\n").unwrap();
        let reason = adapter.get_bool("logging", "ansi").unwrap_err();
        assert!(reason.contains("maybe"));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[store]\npath = ledger.db\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("store", "path"),
            Some("ledger.db".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
