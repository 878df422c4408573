//! # Student Service
//!
//! Exposes the four store operations as request/response pairs and
//! categorizes every store outcome. Stateless apart from the shared store
//! handle; each call performs at most one store mutation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::model::{RecordId, StudentDraft, StudentRecord};
use crate::store::{StoreError, StudentStore};

use super::errors::{ApiError, ApiResult, Operation};

/// Confirmation body for successful deletes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Student CRUD service over a record store
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Create a record; the result carries the assigned id and timestamps
    #[instrument(skip(self, draft))]
    pub fn create(&self, draft: StudentDraft) -> ApiResult<StudentRecord> {
        let record = self
            .store
            .insert(draft)
            .map_err(|e| categorize(Operation::Create, e))?;
        info!(id = %record.id, student_id = %record.student_id, "student created");
        Ok(record)
    }

    /// Every stored record; an empty store is a successful empty list
    #[instrument(skip(self))]
    pub fn list(&self) -> ApiResult<Vec<StudentRecord>> {
        self.store
            .find_all()
            .map_err(|e| categorize(Operation::List, e))
    }

    /// Replace the mutable fields of record `id`
    #[instrument(skip(self, draft))]
    pub fn update(&self, id: &str, draft: StudentDraft) -> ApiResult<StudentRecord> {
        let id = parse_id(id)?;
        let record = self
            .store
            .find_by_id_and_replace(&id, draft)
            .map_err(|e| categorize(Operation::Update, e))?;
        info!(id = %record.id, student_id = %record.student_id, "student updated");
        Ok(record)
    }

    /// Hard-delete record `id`
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> ApiResult<MessageResponse> {
        let id = parse_id(id)?;
        let removed = self
            .store
            .find_by_id_and_delete(&id)
            .map_err(|e| categorize(Operation::Delete, e))?;
        info!(id = %removed.id, student_id = %removed.student_id, "student deleted");
        Ok(MessageResponse {
            message: "Successfully deleted student".to_string(),
        })
    }
}

/// An id that does not parse cannot name a stored record
fn parse_id(raw: &str) -> ApiResult<RecordId> {
    raw.parse().map_err(|_| {
        warn!(id = raw, "malformed record id");
        ApiError::NotFound
    })
}

fn categorize(operation: Operation, err: StoreError) -> ApiError {
    let api_error = ApiError::from_store(operation, err);
    match &api_error {
        ApiError::Internal { diagnostic, .. } => {
            error!(?operation, diagnostic = %diagnostic, "store failure")
        }
        other => warn!(?operation, error = %other, "request rejected"),
    }
    api_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, StudentPayload};
    use crate::store::InMemoryStudentStore;

    fn service() -> StudentService {
        StudentService::new(Arc::new(InMemoryStudentStore::new()))
    }

    fn draft(student_id: &str, name: &str) -> StudentDraft {
        StudentPayload {
            student_id: student_id.to_string(),
            name: name.to_string(),
            address: Address {
                zipcode: "12345678".to_string(),
                street: "Rua A".to_string(),
                neighborhood: "Centro".to_string(),
                city: "SP".to_string(),
                state: "SP".to_string(),
            },
            courses: vec!["Math".to_string()],
        }
        .into()
    }

    #[test]
    fn test_list_empty_is_ok() {
        assert!(service().list().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_conflict() {
        let service = service();
        service.create(draft("S1", "Ana")).unwrap();

        let err = service.create(draft("S1", "Bia")).unwrap_err();
        assert!(matches!(err, ApiError::Conflict { field: "studentId", .. }));
    }

    #[test]
    fn test_update_malformed_id_is_not_found() {
        let err = service().update("nope", draft("S1", "Ana")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn test_update_invalid_body_lists_fields() {
        let service = service();
        let record = service.create(draft("S1", "Ana")).unwrap();

        let mut bad = draft("S1", "");
        bad.address = None;
        let err = service.update(&record.id.to_string(), bad).unwrap_err();

        match err {
            ApiError::BadRequest(violations) => assert_eq!(violations.len(), 6),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_reports_confirmation_then_not_found() {
        let service = service();
        let record = service.create(draft("S1", "Ana")).unwrap();
        let id = record.id.to_string();

        assert_eq!(
            service.delete(&id).unwrap().message,
            "Successfully deleted student"
        );
        assert!(matches!(service.delete(&id), Err(ApiError::NotFound)));
    }
}
