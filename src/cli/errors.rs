//! CLI-specific error types

use std::fmt;
use std::io;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::store::StoreError;
use crate::ui::Alert;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Store could not be opened or the server failed
    BootFailed,
    /// The service rejected or failed a request
    RequestFailed,
    /// No student with the given id
    NotFound,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "STUDENT_CLI_CONFIG_ERROR",
            Self::IoError => "STUDENT_CLI_IO_ERROR",
            Self::BootFailed => "STUDENT_CLI_BOOT_FAILED",
            Self::RequestFailed => "STUDENT_CLI_REQUEST_FAILED",
            Self::NotFound => "STUDENT_CLI_NOT_FOUND",
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

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RequestFailed, msg)
    }

    pub fn not_found(id: &str) -> Self {
        Self::new(CliErrorCode::NotFound, format!("Student not found: {}", id))
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
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

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::boot_failed(e.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::InvalidBaseUrl { .. } => Self::config_error(e.to_string()),
            other => Self::request_failed(other.to_string()),
        }
    }
}

impl From<Alert> for CliError {
    fn from(alert: Alert) -> Self {
        let message = match alert.status {
            Some(status) => format!("{} (HTTP {})", alert.message, status),
            None => alert.message,
        };
        Self::request_failed(message)
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
