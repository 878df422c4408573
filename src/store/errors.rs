//! # Store Errors
//!
//! Error kinds signalled by the record store. The service switches on the
//! variant; nothing downstream inspects messages to recover the kind.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A single required-field failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field path (e.g. "address.city")
    pub field: String,
    /// What was wrong with it
    pub reason: ViolationReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    /// Absent from the document (or null)
    Missing,
    /// Present but an empty string
    Empty,
}

impl FieldViolation {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ViolationReason::Missing,
        }
    }

    pub fn empty(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ViolationReason::Empty,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ViolationReason::Missing => write!(f, "Path `{}` is required.", self.field),
            ViolationReason::Empty => write!(f, "Path `{}` must not be empty.", self.field),
        }
    }
}

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more required fields missing or empty; lists every one of them
    #[error("Validation failed: {}", join_violations(.0))]
    ValidationFailed(Vec<FieldViolation>),

    /// Uniqueness constraint violated
    #[error("Duplicate key: {field} '{value}' already exists")]
    DuplicateKey { field: &'static str, value: String },

    /// No record with the given identity
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Disk I/O failure in a durable store
    #[error("Store I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Persisted data failed its integrity check
    #[error("Store data corrupted: {0}")]
    Corrupted(String),

    /// Anything else (poisoned locks, serialization failures)
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Field paths named by a validation failure, empty for other kinds
    pub fn failing_fields(&self) -> Vec<&str> {
        match self {
            StoreError::ValidationFailed(violations) => {
                violations.iter().map(|v| v.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
