//! CLI-specific error types

use std::fmt;
use std::io;

use crate::persistence::{ConfigError, PersistenceError};
use crate::store::DocumentStoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Malformed command argument
    InvalidArgument,
    /// Store read or write failed
    StoreError,
    /// No matching tag group record
    NotFound,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TAGVAULT_CLI_CONFIG_ERROR",
            Self::IoError => "TAGVAULT_CLI_IO_ERROR",
            Self::InvalidArgument => "TAGVAULT_CLI_INVALID_ARGUMENT",
            Self::StoreError => "TAGVAULT_CLI_STORE_ERROR",
            Self::NotFound => "TAGVAULT_CLI_NOT_FOUND",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    pub fn store_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreError, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::NotFound, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<PersistenceError> for CliError {
    fn from(e: PersistenceError) -> Self {
        Self::store_error(e.to_string())
    }
}

impl From<DocumentStoreError> for CliError {
    fn from(e: DocumentStoreError) -> Self {
        Self::store_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::not_found("no record");
        assert_eq!(err.to_string(), "TAGVAULT_CLI_NOT_FOUND: no record");
        assert_eq!(err.code(), &CliErrorCode::NotFound);
    }

    #[test]
    fn test_conversions() {
        let err: CliError = ConfigError::Parse("eof".to_string()).into();
        assert_eq!(err.code_str(), "TAGVAULT_CLI_CONFIG_ERROR");

        let err: CliError = DocumentStoreError::Io("gone".to_string()).into();
        assert_eq!(err.code_str(), "TAGVAULT_CLI_STORE_ERROR");
        assert!(err.message().contains("gone"));
    }
}
