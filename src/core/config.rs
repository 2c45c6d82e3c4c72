//! Configuration management

use crate::cli::Command;
use clap::Parser;
use config::builder::{ConfigBuilder as Builder, DefaultState};
use config::{Config as ConfigBuilder, ConfigError as BuilderError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid storage configuration: {0}")]
    InvalidStorage(String),

    #[error("Invalid search configuration: {0}")]
    InvalidSearch(String),

    #[error("Invalid reader configuration: {0}")]
    InvalidReader(String),

    #[error("Invalid preferences configuration: {0}")]
    InvalidPreferences(String),

    #[error("Invalid notification configuration: {0}")]
    InvalidNotifications(String),

    #[error("Invalid logging configuration: {0}")]
    InvalidLogging(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

impl From<BuilderError> for ConfigError {
    fn from(err: BuilderError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub reader: ReaderConfig,
    pub preferences: PreferencesConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration with precedence: CLI args > Environment variables > Config file > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(&CliArgs::parse())
    }

    /// Build configuration from already-parsed command-line arguments
    pub fn from_args(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        // 1. Defaults (lowest priority)
        let mut builder = with_defaults(ConfigBuilder::builder())?;

        // 2. Config file (medium priority)
        if let Some(config_path) = &cli_args.config {
            if !config_path.exists() {
                return Err(ConfigError::FileNotFound(config_path.display().to_string()));
            }
            builder = builder.add_source(File::from(config_path.as_path()));
        }

        // 3. Environment variables, e.g. SHELF_SEARCH__DELAY_MS=0
        builder = builder.add_source(
            Environment::with_prefix("SHELF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI arguments (highest priority)
        if let Some(db_path) = &cli_args.database {
            builder = builder.set_override("storage.database_path", db_path.display().to_string())?;
        }
        if let Some(seed) = &cli_args.catalog {
            builder = builder.set_override("catalog.seed_file", seed.display().to_string())?;
        }
        if let Some(log_level) = &cli_args.log_level {
            builder = builder.set_override("logging.level", log_level.clone())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, layered over the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config: Config = with_defaults(ConfigBuilder::builder())?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        let config: Config = with_defaults(ConfigBuilder::builder())?
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.search.validate()?;
        self.reader.validate()?;
        self.preferences.validate()?;
        self.notifications.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn with_defaults(builder: Builder<DefaultState>) -> Result<Builder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("storage.backend", "sqlite")?
        .set_default(
            "storage.database_path",
            default_database_path().display().to_string(),
        )?
        .set_default("storage.pool_size", 4)?
        .set_default("storage.busy_timeout_ms", 5000)?
        .set_default("search.delay_ms", 500)?
        .set_default("search.history_limit", 10)?
        .set_default("reader.total_pages", 10)?
        .set_default("reader.page_turn_ms", 300)?
        .set_default("preferences.tick_interval_secs", 60)?
        .set_default("notifications.history_size", 100)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stdout")?
        .set_default("logging.rotation", "never")?)
}

/// Device-local database location: the platform data directory when known
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("shelf-reader").join("device.db"))
        .unwrap_or_else(|| PathBuf::from("./data/device.db"))
}

/// Command-line arguments for configuration override
#[derive(Debug, Parser)]
#[command(name = "shelf-reader")]
#[command(about = "E-book storefront and reader", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Device storage database path
    #[arg(short, long, value_name = "PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Catalog seed file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_path: PathBuf,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Sqlite && self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidStorage("database_path cannot be empty".to_string()));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::InvalidStorage("pool_size must be greater than 0".to_string()));
        }

        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::InvalidStorage(
                "busy_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// External seed replacing the bundled catalog
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub delay_ms: u64,
    pub history_limit: usize,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidSearch(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub total_pages: u32,
    pub page_turn_ms: u64,
}

impl ReaderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_pages == 0 {
            return Err(ConfigError::InvalidReader(
                "total_pages must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn page_turn(&self) -> Duration {
        Duration::from_millis(self.page_turn_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    pub tick_interval_secs: u64,
}

impl PreferencesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_secs == 0 {
            return Err(ConfigError::InvalidPreferences(
                "tick_interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub history_size: usize,
}

impl NotificationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::InvalidNotifications(
                "history_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    pub rotation: String,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "level must be one of: {:?}",
                valid_levels
            )));
        }

        let valid_formats = ["json", "text"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "format must be one of: {:?}",
                valid_formats
            )));
        }

        let valid_outputs = ["stdout", "file"];
        if !valid_outputs.contains(&self.output.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "output must be one of: {:?}",
                valid_outputs
            )));
        }

        if self.output == "file" && self.log_file.is_none() {
            return Err(ConfigError::InvalidLogging(
                "log_file must be specified when output is 'file'".to_string(),
            ));
        }

        let valid_rotations = ["never", "daily", "hourly"];
        if !valid_rotations.contains(&self.rotation.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "rotation must be one of: {:?}",
                valid_rotations
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder as TempBuilder;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::defaults().unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.search.delay(), Duration::from_millis(500));
        assert_eq!(config.search.history_limit, 10);
        assert_eq!(config.reader.total_pages, 10);
        assert_eq!(config.reader.page_turn(), Duration::from_millis(300));
        assert_eq!(config.preferences.tick_interval(), Duration::from_secs(60));
        assert!(config.catalog.seed_file.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = TempBuilder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[search]\ndelay_ms = 0\nhistory_limit = 5\n\n[storage]\nbackend = \"memory\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.search.delay_ms, 0);
        assert_eq!(config.search.history_limit, 5);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        // untouched sections keep their defaults
        assert_eq!(config.reader.total_pages, 10);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::defaults().unwrap();
        config.reader.total_pages = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidReader(_))));

        let mut config = Config::defaults().unwrap();
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLogging(_))));

        let mut config = Config::defaults().unwrap();
        config.logging.output = "file".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLogging(_))));
    }

    #[test]
    fn test_cli_flags_take_precedence() {
        let mut file = TempBuilder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"error\"").unwrap();
        let config_path = file.path().display().to_string();

        let args = CliArgs::try_parse_from([
            "shelf-reader",
            "--config",
            config_path.as_str(),
            "--database",
            "/tmp/shelf/device.db",
            "--log-level",
            "debug",
            "config",
        ])
        .unwrap();

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/shelf/device.db"));
    }

    #[test]
    fn test_effective_config_renders_as_toml() {
        let config = Config::defaults().unwrap();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[search]"));
        assert!(rendered.contains("history_limit = 10"));
    }
}
