//! Volatile store, used when no data path is configured and in tests.

use std::sync::RwLock;

use tracing::debug;

use crate::model::{RecordId, StudentDraft, StudentRecord};

use super::collection::StudentCollection;
use super::errors::{StoreError, StoreResult};
use super::StudentStore;

/// In-memory student store
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    collection: RwLock<StudentCollection>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Internal("Lock poisoned".to_string())
}

impl StudentStore for InMemoryStudentStore {
    fn insert(&self, candidate: StudentDraft) -> StoreResult<StudentRecord> {
        let mut collection = self.collection.write().map_err(poisoned)?;
        let record = collection.prepare_insert(candidate)?;
        collection.put(record.clone());
        debug!(id = %record.id, "record inserted");
        Ok(record)
    }

    fn find_all(&self) -> StoreResult<Vec<StudentRecord>> {
        let collection = self.collection.read().map_err(poisoned)?;
        Ok(collection.records().to_vec())
    }

    fn find_by_id_and_replace(
        &self,
        id: &RecordId,
        candidate: StudentDraft,
    ) -> StoreResult<StudentRecord> {
        let mut collection = self.collection.write().map_err(poisoned)?;
        let record = collection.prepare_replace(id, candidate)?;
        collection.put(record.clone());
        debug!(id = %record.id, "record replaced");
        Ok(record)
    }

    fn find_by_id_and_delete(&self, id: &RecordId) -> StoreResult<StudentRecord> {
        let mut collection = self.collection.write().map_err(poisoned)?;
        let removed = collection
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        debug!(id = %removed.id, "record deleted");
        Ok(removed)
    }
}
