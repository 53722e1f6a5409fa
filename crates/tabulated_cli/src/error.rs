//! CLI error types

use tabulated_core::types::{FormatError, TabulatedError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `tabulated` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tabulated function error: {0}")]
    Tabulated(#[from] TabulatedError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::FileNotFound("missing.txt".to_string());
        assert_eq!(err.to_string(), "File not found: missing.txt");

        let err: CliError = TabulatedError::InvalidStep { step: 0.0 }.into();
        assert!(err.to_string().starts_with("Tabulated function error"));

        let err: CliError = ConfigError::InvalidThreads(0).into();
        assert!(err.to_string().contains("Invalid thread count"));
    }
}
