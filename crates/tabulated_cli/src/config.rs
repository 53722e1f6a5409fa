//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tabulated_core::factory::StorageKind;
use tabulated_core::io::DecimalSeparator;
use thiserror::Error;

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "TABULATED_LOG_LEVEL";
/// Environment variable overriding the storage kind
pub const ENV_STORAGE: &str = "TABULATED_STORAGE";
/// Environment variable overriding the harness thread count
pub const ENV_THREADS: &str = "TABULATED_THREADS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid storage kind: {0}. Must be one of: array, linked_list")]
    InvalidStorage(String),

    #[error("Invalid thread count: {0}. Must be at least 1")]
    InvalidThreads(usize),

    #[error("Invalid decimal separator: {0}. Must be one of: dot, comma")]
    InvalidSeparator(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Storage for functions produced by commands
    pub storage: StorageKind,
    /// Worker threads for the concurrency harness
    pub threads: usize,
    /// Decimal separator expected when reading text files
    #[serde(deserialize_with = "deserialize_separator")]
    pub decimal_separator: DecimalSeparator,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_separator<'de, D>(deserializer: D) -> Result<DecimalSeparator, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_separator(&s).map_err(serde::de::Error::custom)
}

/// Parse `dot` / `comma` (or the characters themselves).
pub fn parse_separator(s: &str) -> Result<DecimalSeparator, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "dot" | "." => Ok(DecimalSeparator::Dot),
        "comma" | "," => Ok(DecimalSeparator::Comma),
        _ => Err(ConfigError::InvalidSeparator(s.to_string())),
    }
}

fn parse_storage(s: &str) -> Result<StorageKind, ConfigError> {
    StorageKind::from_str(s).map_err(|_| ConfigError::InvalidStorage(s.to_string()))
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            storage: StorageKind::Array,
            threads: 4,
            decimal_separator: DecimalSeparator::Dot,
        }
    }
}

impl CliConfig {
    /// Override fields present in `lookup` (keyed by environment variable name)
    pub fn apply_env<L>(&mut self, lookup: L) -> Result<(), ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&log_level)?;
        }
        if let Some(storage) = lookup(ENV_STORAGE) {
            self.storage = parse_storage(&storage)?;
        }
        if let Some(threads) = lookup(ENV_THREADS) {
            self.threads = threads
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_THREADS, threads)))?;
        }
        self.validate()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads(self.threads));
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(storage) = &cli.storage {
            self.storage = parse_storage(storage)?;
        }
        if let Some(separator) = &cli.separator {
            self.decimal_separator = parse_separator(separator)?;
        }
        Ok(())
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Storage override
    pub storage: Option<String>,
    /// Decimal separator override
    pub separator: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<L>(cli: &CliArgs, lookup: L) -> Result<CliConfig, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.storage, StorageKind::Array);
        assert_eq!(config.threads, 4);
        assert_eq!(config.decimal_separator, DecimalSeparator::Dot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_separator_parsing() {
        assert_eq!(parse_separator("comma").unwrap(), DecimalSeparator::Comma);
        assert_eq!(parse_separator(".").unwrap(), DecimalSeparator::Dot);
        assert!(parse_separator("semicolon").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            storage = "linked_list"
            threads = 16
            decimal_separator = "comma"
        "#;

        let config = CliConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.storage, StorageKind::LinkedList);
        assert_eq!(config.threads, 16);
        assert_eq!(config.decimal_separator, DecimalSeparator::Comma);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = CliConfig::from_toml("threads = 2").unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.threads, 2);
        assert_eq!(config.storage, StorageKind::Array);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_toml_validation() {
        assert!(matches!(
            CliConfig::from_toml("threads = 0"),
            Err(ConfigError::InvalidThreads(0))
        ));
        assert!(matches!(
            CliConfig::from_toml("storage = \"tree\""),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env(env(&[(ENV_STORAGE, "linked"), (ENV_THREADS, "8"), (ENV_LOG_LEVEL, "info")]))
            .unwrap();
        assert_eq!(config.storage, StorageKind::LinkedList);
        assert_eq!(config.threads, 8);
        assert_eq!(config.log_level, LogLevel::Info);

        assert!(matches!(
            config.apply_env(env(&[(ENV_THREADS, "many")])),
            Err(ConfigError::EnvError(_))
        ));
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let path = std::env::temp_dir().join(format!("tabulated_cli_config_{}.toml", std::process::id()));
        std::fs::write(&path, "storage = \"linked_list\"\nthreads = 3\nlog_level = \"error\"\n").unwrap();

        let cli = CliArgs {
            config_file: Some(path.clone()),
            log_level: None,
            storage: None,
            separator: None,
        };
        let from_file = build_config_with(&cli, env(&[])).unwrap();
        assert_eq!(from_file.storage, StorageKind::LinkedList);
        assert_eq!(from_file.threads, 3);

        let from_env = build_config_with(&cli, env(&[(ENV_THREADS, "5"), (ENV_LOG_LEVEL, "debug")])).unwrap();
        assert_eq!(from_env.threads, 5);
        assert_eq!(from_env.log_level, LogLevel::Debug);

        let cli = CliArgs {
            log_level: Some("trace".to_string()),
            storage: Some("array".to_string()),
            separator: Some("comma".to_string()),
            ..cli
        };
        let from_cli = build_config_with(&cli, env(&[(ENV_LOG_LEVEL, "debug")])).unwrap();
        assert_eq!(from_cli.log_level, LogLevel::Trace);
        assert_eq!(from_cli.storage, StorageKind::Array);
        assert_eq!(from_cli.threads, 3);
        assert_eq!(from_cli.decimal_separator, DecimalSeparator::Comma);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/tabulated.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err = ConfigError::InvalidStorage("tree".to_string());
        assert!(err.to_string().contains("linked_list"));
    }
}
