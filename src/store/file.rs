//! # Durable Student Store
//!
//! Persists every mutation to an append-only log before acknowledging it.
//!
//! - Constraint checks run against the in-memory collection first; a rejected
//!   candidate never reaches the log
//! - The log line is fsync'd before the collection is updated
//! - On open the log is replayed; a torn final line is truncated away
//! - A failed append rolls the file back to its previous length

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::model::{RecordId, StudentDraft, StudentRecord};

use super::collection::StudentCollection;
use super::errors::{StoreError, StoreResult};
use super::log::{encode_line, replay, LogEntry};
use super::StudentStore;

/// File-backed student store
pub struct FileStudentStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    collection: StudentCollection,
    file: File,
    /// Current log length in bytes
    len: u64,
}

impl FileStudentStore {
    /// Opens (or creates) the log at `path` and replays it.
    ///
    /// Parent directories are created if missing.
    ///
    /// # Errors
    ///
    /// `StoreError::Io` if the file cannot be opened or read,
    /// `StoreError::Corrupted` if a complete log line fails its checksum.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(format!("Failed to open {}", path.display()), e))?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| StoreError::io(format!("Failed to read {}", path.display()), e))?;

        let file_len = contents.len() as u64;
        let replayed = replay(&contents)?;

        if replayed.has_torn_tail(file_len) {
            warn!(
                path = %path.display(),
                discarded_bytes = file_len - replayed.valid_len,
                "discarding torn final log entry"
            );
            file.set_len(replayed.valid_len)
                .map_err(|e| StoreError::io("Failed to truncate torn log tail", e))?;
            file.sync_all()
                .map_err(|e| StoreError::io("Failed to sync truncated log", e))?;
        }

        info!(
            path = %path.display(),
            entries = replayed.entries,
            records = replayed.collection.len(),
            "student log replayed"
        );

        Ok(Self {
            path,
            inner: Mutex::new(Inner {
                collection: replayed.collection,
                file,
                len: replayed.valid_len,
            }),
        })
    }

    /// Path of the backing log
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }
}

impl Inner {
    /// Appends and fsyncs one entry, then applies it to the collection.
    fn commit(&mut self, entry: LogEntry) -> StoreResult<()> {
        let line = encode_line(&entry)?;

        let written = self
            .file
            .write_all(line.as_bytes())
            .and_then(|_| self.file.sync_data());

        if let Err(e) = written {
            // Leave no partial line behind for the next append to extend
            if let Err(rollback) = self.file.set_len(self.len) {
                warn!(error = %rollback, "failed to roll back partial log append");
            }
            return Err(StoreError::io("Failed to append log entry", e));
        }

        self.len += line.len() as u64;
        entry.apply(&mut self.collection);
        Ok(())
    }
}

impl StudentStore for FileStudentStore {
    fn insert(&self, candidate: StudentDraft) -> StoreResult<StudentRecord> {
        let mut inner = self.lock()?;
        let record = inner.collection.prepare_insert(candidate)?;
        inner.commit(LogEntry::Put {
            record: record.clone(),
        })?;
        debug!(id = %record.id, "record inserted");
        Ok(record)
    }

    fn find_all(&self) -> StoreResult<Vec<StudentRecord>> {
        let inner = self.lock()?;
        Ok(inner.collection.records().to_vec())
    }

    fn find_by_id_and_replace(
        &self,
        id: &RecordId,
        candidate: StudentDraft,
    ) -> StoreResult<StudentRecord> {
        let mut inner = self.lock()?;
        let record = inner.collection.prepare_replace(id, candidate)?;
        inner.commit(LogEntry::Put {
            record: record.clone(),
        })?;
        debug!(id = %record.id, "record replaced");
        Ok(record)
    }

    fn find_by_id_and_delete(&self, id: &RecordId) -> StoreResult<StudentRecord> {
        let mut inner = self.lock()?;
        let existing = inner
            .collection
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        inner.commit(LogEntry::Delete { id: *id })?;
        debug!(id = %id, "record deleted");
        Ok(existing)
    }
}
