//! # Student Record Store
//!
//! Persistent collection of student documents.
//!
//! # Guarantees
//!
//! - `studentId` is unique across all records, checked atomically with the write
//! - Every required field (including the five address parts) is checked on
//!   insert and replace; all failures are reported together
//! - A rejected operation leaves the store unchanged
//! - `id` and `createdAt` never change; `updatedAt` advances on every replace

mod collection;
mod errors;
mod file;
mod log;
mod memory;
mod validation;

pub use collection::StudentCollection;
pub use errors::{FieldViolation, StoreError, StoreResult, ViolationReason};
pub use file::FileStudentStore;
pub use log::LogEntry;
pub use memory::InMemoryStudentStore;
pub use validation::validate_draft;

use crate::model::{RecordId, StudentDraft, StudentRecord};

/// Record store contract.
pub trait StudentStore: Send + Sync {
    /// Validates and inserts a new record, assigning `id` and timestamps.
    ///
    /// Fails with `ValidationFailed` or `DuplicateKey`.
    fn insert(&self, candidate: StudentDraft) -> StoreResult<StudentRecord>;

    /// Every record, in insertion order.
    fn find_all(&self) -> StoreResult<Vec<StudentRecord>>;

    /// Replaces the mutable fields of record `id` and returns the result.
    ///
    /// Fails with `NotFound`, `ValidationFailed` or `DuplicateKey`.
    fn find_by_id_and_replace(
        &self,
        id: &RecordId,
        candidate: StudentDraft,
    ) -> StoreResult<StudentRecord>;

    /// Removes record `id` and returns it. Fails with `NotFound`.
    fn find_by_id_and_delete(&self, id: &RecordId) -> StoreResult<StudentRecord>;
}
