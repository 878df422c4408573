//! User-facing failure notice

use thiserror::Error;

use crate::client::ClientError;

pub const SAVE_FAILED: &str = "Could not save.";
pub const LOAD_FAILED: &str = "Could not load students.";
pub const DELETE_FAILED: &str = "Could not delete.";

/// Failure surfaced to the user by a controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct Alert {
    pub title: String,
    pub message: String,

    /// HTTP status, when the failure came from a server response
    pub status: Option<u16>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Server message verbatim when present, otherwise `fallback`
    pub fn from_client(err: &ClientError, fallback: &str) -> Self {
        Self {
            title: "Error".to_string(),
            message: err.server_message().unwrap_or(fallback).to_string(),
            status: err.status(),
        }
    }
}
