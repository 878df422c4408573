//! # Student API Errors
//!
//! Categorized failures of the student endpoints and their HTTP mapping.
//! Store error kinds map one-to-one onto categories; validation and
//! duplicate-key failures are never collapsed into a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::{FieldViolation, StoreError};

/// Result type for student service operations
pub type ApiResult<T> = Result<T, ApiError>;

/// The service operation an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl Operation {
    /// Message reported with an internal error
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Create => "Error creating student",
            Operation::List => "Error finding student",
            Operation::Update => "Error updating student",
            Operation::Delete => "Error deleting student",
        }
    }
}

/// Student API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required fields missing or empty
    #[error("Invalid data")]
    BadRequest(Vec<FieldViolation>),

    /// Body is not a JSON document of the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Uniqueness violation
    #[error("{field} already exists")]
    Conflict { field: &'static str, value: String },

    /// No record with the requested id
    #[error("Student not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Anything else; the diagnostic is opaque to clients
    #[error("{}", .operation.failure_message())]
    Internal {
        operation: Operation,
        diagnostic: String,
    },
}

impl ApiError {
    /// Categorizes a store failure raised during `operation`
    pub fn from_store(operation: Operation, err: StoreError) -> Self {
        match err {
            StoreError::ValidationFailed(violations) => ApiError::BadRequest(violations),
            StoreError::DuplicateKey { field, value } => ApiError::Conflict { field, value },
            StoreError::NotFound(_) => ApiError::NotFound,
            other @ (StoreError::Io { .. }
            | StoreError::Corrupted(_)
            | StoreError::Internal(_)) => ApiError::Internal {
                operation,
                diagnostic: other.to_string(),
            },
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: u16,

    /// Conflicting field, for 409
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Every failing field path, for 400
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Per-field messages, for 400
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,

    /// Opaque diagnostic, for 400 body errors and 500
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let mut body = Self {
            message: err.to_string(),
            code: err.status_code().as_u16(),
            field: None,
            fields: Vec::new(),
            details: Vec::new(),
            error: None,
        };

        match err {
            ApiError::BadRequest(violations) => {
                body.details = violations.iter().map(ToString::to_string).collect();
                body.fields = violations.into_iter().map(|v| v.field).collect();
            }
            ApiError::InvalidBody(reason) => {
                body.message = "Invalid request body".to_string();
                body.error = Some(reason);
            }
            ApiError::Conflict { field, .. } => body.field = Some(field.to_string()),
            ApiError::NotFound => {}
            ApiError::Internal { diagnostic, .. } => body.error = Some(diagnostic),
        }

        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict {
                field: "studentId",
                value: "S1".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal {
                operation: Operation::Create,
                diagnostic: "boom".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_kinds_map_to_distinct_categories() {
        let bad = ApiError::from_store(
            Operation::Create,
            StoreError::ValidationFailed(vec![FieldViolation::missing("name")]),
        );
        assert!(matches!(bad, ApiError::BadRequest(_)));

        let dup = ApiError::from_store(
            Operation::Update,
            StoreError::DuplicateKey {
                field: "studentId",
                value: "S1".to_string(),
            },
        );
        assert!(matches!(dup, ApiError::Conflict { field: "studentId", .. }));

        let missing = ApiError::from_store(Operation::Delete, StoreError::NotFound("x".into()));
        assert!(matches!(missing, ApiError::NotFound));

        let internal = ApiError::from_store(
            Operation::List,
            StoreError::Internal("Lock poisoned".to_string()),
        );
        assert_eq!(internal.to_string(), "Error finding student");
    }

    #[test]
    fn test_bad_request_body_lists_fields() {
        let err = ApiError::BadRequest(vec![
            FieldViolation::missing("name"),
            FieldViolation::missing("address.city"),
        ]);
        let body = serde_json::to_value(ErrorResponse::from(err)).unwrap();

        assert_eq!(body["message"], "Invalid data");
        assert_eq!(body["code"], 400);
        assert_eq!(body["fields"], serde_json::json!(["name", "address.city"]));
        assert_eq!(body["details"][0], "Path `name` is required.");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_conflict_body_names_field() {
        let err = ApiError::Conflict {
            field: "studentId",
            value: "S1".to_string(),
        };
        let body = serde_json::to_value(ErrorResponse::from(err)).unwrap();
        assert_eq!(body["message"], "studentId already exists");
        assert_eq!(body["field"], "studentId");
    }
}
