//! Process configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an empty
//! object (or no file at all) yields a runnable in-memory server.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::rest_api::TableNames;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Directory for persistent tables; in-memory when absent
    #[serde(default)]
    pub data_dir: Option<String>,

    #[serde(default = "default_species_table")]
    pub species_table: String,

    #[serde(default = "default_occurrences_table")]
    pub occurrences_table: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_species_table() -> String {
    TableNames::default().species
}

fn default_occurrences_table() -> String {
    TableNames::default().occurrences
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            data_dir: None,
            species_table: default_species_table(),
            occurrences_table: default_occurrences_table(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        for (field, name) in [
            ("species_table", &self.species_table),
            ("occurrences_table", &self.occurrences_table),
        ] {
            if name.is_empty() {
                return Err(CliError::config_error(format!("{} must not be empty", field)));
            }
            if !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(CliError::config_error(format!(
                    "{} contains invalid characters: {:?}",
                    field, name
                )));
            }
        }

        if self.species_table == self.occurrences_table {
            return Err(CliError::config_error(
                "species_table and occurrences_table must differ",
            ));
        }

        if matches!(&self.data_dir, Some(dir) if dir.is_empty()) {
            return Err(CliError::config_error("data_dir must not be empty when set"));
        }

        Ok(())
    }

    /// Data directory, if persistence is configured
    pub fn data_path(&self) -> Option<&Path> {
        self.data_dir.as_deref().map(Path::new)
    }

    pub fn tables(&self) -> TableNames {
        TableNames {
            species: self.species_table.clone(),
            occurrences: self.occurrences_table.clone(),
        }
    }

    pub fn table_list(&self) -> [&str; 2] {
        [&self.species_table, &self.occurrences_table]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.tables(), TableNames::default());
        assert_eq!(config.data_path(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plantdb.json");
        fs::write(
            &path,
            r#"{"server": {"port": 9100}, "data_dir": "/var/lib/plantdb", "log_format": "json"}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data_path(), Some(Path::new("/var/lib/plantdb")));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.species_table, "Plants");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plantdb.json");
        fs::write(&path, r#"{"log_format": "xml"}"#).unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.occurrences_table = "Plants".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.species_table = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.species_table = "../etc".to_string();
        assert!(config.validate().is_err());
    }
}
