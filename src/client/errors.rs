//! # Client Errors
//!
//! Failures of the data access layer and of the postal-code lookup.

use thiserror::Error;

/// Result type for data access operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Data access layer errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured API base address is unusable
    #[error("Invalid API base address '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Update and delete need a non-empty record id
    #[error("A record id is required")]
    MissingId,

    /// Connection, timeout or other transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Server responded {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose body is not the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message provided by the server, verbatim
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Postal-code lookup errors
#[derive(Debug, Error)]
pub enum PostalLookupError {
    /// Not 8 digits after stripping non-digits
    #[error("Invalid zipcode '{0}': expected 8 digits")]
    InvalidZipcode(String),

    #[error("Invalid lookup base address '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Lookup service responded {0}")]
    Status(u16),

    #[error("Unexpected lookup response: {0}")]
    Decode(String),
}
