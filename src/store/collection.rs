//! In-memory student collection shared by every store implementation.
//!
//! Mutations are split in two steps: `prepare_*` checks constraints and builds
//! the resulting record without touching the collection, and `put`/`remove`
//! apply it. Durable stores persist between the two steps.

use chrono::{DateTime, Duration, Utc};

use crate::model::{RecordId, StudentDraft, StudentRecord};

use super::errors::{StoreError, StoreResult};
use super::validation::validate_draft;

/// Records in insertion order.
#[derive(Debug, Default, Clone)]
pub struct StudentCollection {
    records: Vec<StudentRecord>,
}

impl StudentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Builds a new record from `draft` with a fresh id and timestamps.
    pub fn prepare_insert(&self, draft: StudentDraft) -> StoreResult<StudentRecord> {
        let payload = validate_draft(draft)?;
        self.ensure_unique(&payload.student_id, None)?;

        let now = Utc::now();
        Ok(StudentRecord {
            id: RecordId::generate(),
            student_id: payload.student_id,
            name: payload.name,
            address: payload.address,
            courses: payload.courses,
            created_at: now,
            updated_at: now,
        })
    }

    /// Builds the replacement of record `id`; `id` and `created_at` carry over.
    pub fn prepare_replace(&self, id: &RecordId, draft: StudentDraft) -> StoreResult<StudentRecord> {
        let existing = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let payload = validate_draft(draft)?;
        self.ensure_unique(&payload.student_id, Some(id))?;

        Ok(StudentRecord {
            id: existing.id,
            student_id: payload.student_id,
            name: payload.name,
            address: payload.address,
            courses: payload.courses,
            created_at: existing.created_at,
            updated_at: next_timestamp(existing.updated_at),
        })
    }

    /// Inserts `record`, or replaces the record with the same id in place.
    pub fn put(&mut self, record: StudentRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Removes and returns record `id`, if present.
    pub fn remove(&mut self, id: &RecordId) -> Option<StudentRecord> {
        let idx = self.records.iter().position(|r| r.id == *id)?;
        Some(self.records.remove(idx))
    }

    fn ensure_unique(&self, student_id: &str, except: Option<&RecordId>) -> StoreResult<()> {
        let taken = self
            .records
            .iter()
            .any(|r| r.student_id == student_id && Some(&r.id) != except);

        if taken {
            return Err(StoreError::DuplicateKey {
                field: "studentId",
                value: student_id.to_string(),
            });
        }
        Ok(())
    }
}

/// `updatedAt` must move forward even if the wall clock has not ticked
/// (or went backwards) since the previous mutation.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddressDraft;

    fn draft(student_id: &str, name: &str) -> StudentDraft {
        StudentDraft {
            student_id: Some(student_id.to_string()),
            name: Some(name.to_string()),
            address: Some(AddressDraft {
                zipcode: Some("12345678".to_string()),
                street: Some("Rua A".to_string()),
                neighborhood: Some("Centro".to_string()),
                city: Some("SP".to_string()),
                state: Some("SP".to_string()),
            }),
            courses: Some(vec!["Math".to_string()]),
        }
    }

    fn insert(collection: &mut StudentCollection, student_id: &str) -> StudentRecord {
        let record = collection.prepare_insert(draft(student_id, "Ana")).unwrap();
        collection.put(record.clone());
        record
    }

    #[test]
    fn test_prepare_insert_does_not_mutate() {
        let collection = StudentCollection::new();
        let record = collection.prepare_insert(draft("S1", "Ana")).unwrap();
        assert!(collection.is_empty());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut collection = StudentCollection::new();
        let a = insert(&mut collection, "S1");
        let b = insert(&mut collection, "S2");
        let c = insert(&mut collection, "S3");

        let ids: Vec<_> = collection.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn test_duplicate_student_id_rejected() {
        let mut collection = StudentCollection::new();
        insert(&mut collection, "S1");

        let result = collection.prepare_insert(draft("S1", "Someone Else"));
        assert!(matches!(
            result,
            Err(StoreError::DuplicateKey { field: "studentId", .. })
        ));
    }

    #[test]
    fn test_replace_keeps_identity_and_created_at() {
        let mut collection = StudentCollection::new();
        let original = insert(&mut collection, "S1");

        let updated = collection
            .prepare_replace(&original.id, draft("S1", "Ana Maria"))
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.name, "Ana Maria");
    }

    #[test]
    fn test_replace_to_other_records_student_id_conflicts() {
        let mut collection = StudentCollection::new();
        insert(&mut collection, "S1");
        let second = insert(&mut collection, "S2");

        let result = collection.prepare_replace(&second.id, draft("S1", "Bia"));
        assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
    }

    #[test]
    fn test_replace_unknown_id_is_not_found_before_validation() {
        let collection = StudentCollection::new();
        let result = collection.prepare_replace(&RecordId::generate(), StudentDraft::default());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut collection = StudentCollection::new();
        let first = insert(&mut collection, "S1");
        insert(&mut collection, "S2");

        let updated = collection
            .prepare_replace(&first.id, draft("S9", "Ana"))
            .unwrap();
        collection.put(updated);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.records()[0].student_id, "S9");
    }

    #[test]
    fn test_remove() {
        let mut collection = StudentCollection::new();
        let record = insert(&mut collection, "S1");

        assert_eq!(collection.remove(&record.id).map(|r| r.id), Some(record.id));
        assert!(collection.remove(&record.id).is_none());
    }

    #[test]
    fn test_next_timestamp_strictly_increases() {
        let future = Utc::now() + Duration::hours(1);
        assert!(next_timestamp(future) > future);
    }
}
