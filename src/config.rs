//! Configuration management for Bookshelf server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Where the lending ledger is persisted and when it is written
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    /// Load `data_file` at startup (a missing file starts an empty ledger)
    pub load_on_start: bool,
    /// Save after every successful ledger mutation and on shutdown
    pub autosave: bool,
}

/// Loan period and overdue fine applied by the ledger
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LendingConfig {
    pub loan_days: i64,
    /// Fine charged per whole day past the due date
    pub daily_fine: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub lending: LendingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKSHELF_SERVER__PORT=9000, BOOKSHELF_LENDING__DAILY_FINE=1.5, ...
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "storage.data_file",
                env::var("BOOKSHELF_DATA_FILE").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("biblioteca.json"),
            load_on_start: true,
            autosave: false,
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            loan_days: 15,
            daily_fine: 2.0,
        }
    }
}
