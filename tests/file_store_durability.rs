//! File Store Durability Tests
//!
//! - Acknowledged mutations survive reopen
//! - Deletes survive reopen
//! - A torn final write is discarded and the store stays writable
//! - A corrupt complete entry refuses to open

use std::fs::{self, OpenOptions};
use std::io::Write;

use student_records::model::{AddressDraft, StudentDraft};
use student_records::store::{FileStudentStore, StoreError, StudentStore};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

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

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

// =============================================================================
// Durability
// =============================================================================

#[test]
fn test_acknowledged_writes_survive_reopen() {
    let dir = create_temp_dir();
    let path = dir.path().join("students.log");

    let (first, updated) = {
        let store = FileStudentStore::open(&path).unwrap();
        let first = store.insert(draft("S1", "Ana")).unwrap();
        store.insert(draft("S2", "Bia")).unwrap();
        let updated = store
            .find_by_id_and_replace(&first.id, draft("S1", "Ana Maria"))
            .unwrap();
        (first, updated)
    };

    let store = FileStudentStore::open(&path).unwrap();
    let records = store.find_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first.id);
    assert_eq!(records[0].name, "Ana Maria");
    assert_eq!(records[0].created_at, first.created_at);
    assert_eq!(records[0].updated_at, updated.updated_at);
    assert_eq!(records[1].student_id, "S2");
}

#[test]
fn test_delete_survives_reopen() {
    let dir = create_temp_dir();
    let path = dir.path().join("students.log");

    let id = {
        let store = FileStudentStore::open(&path).unwrap();
        let record = store.insert(draft("S1", "Ana")).unwrap();
        store.find_by_id_and_delete(&record.id).unwrap();
        record.id
    };

    let store = FileStudentStore::open(&path).unwrap();
    assert!(store.find_all().unwrap().is_empty());
    assert!(matches!(
        store.find_by_id_and_delete(&id),
        Err(StoreError::NotFound(_))
    ));

    // The freed studentId is usable again
    store.insert(draft("S1", "Ana")).unwrap();
}

#[test]
fn test_uniqueness_holds_after_reopen() {
    let dir = create_temp_dir();
    let path = dir.path().join("students.log");
    {
        let store = FileStudentStore::open(&path).unwrap();
        store.insert(draft("S1", "Ana")).unwrap();
    }

    let store = FileStudentStore::open(&path).unwrap();
    assert!(matches!(
        store.insert(draft("S1", "Bia")),
        Err(StoreError::DuplicateKey { field: "studentId", .. })
    ));
}

// =============================================================================
// Crash Handling
// =============================================================================

#[test]
fn test_torn_tail_is_discarded() {
    let dir = create_temp_dir();
    let path = dir.path().join("students.log");
    {
        let store = FileStudentStore::open(&path).unwrap();
        store.insert(draft("S1", "Ana")).unwrap();
    }
    let intact_len = fs::metadata(&path).unwrap().len();

    // Simulate a crash mid-append
    {
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"0badc0de {\"op\":\"put\",\"rec").unwrap();
    }

    {
        let store = FileStudentStore::open(&path).unwrap();
        assert_eq!(store.find_all().unwrap().len(), 1);
        assert_eq!(fs::metadata(&path).unwrap().len(), intact_len);

        store.insert(draft("S2", "Bia")).unwrap();
    }

    let store = FileStudentStore::open(&path).unwrap();
    assert_eq!(store.find_all().unwrap().len(), 2);
}

#[test]
fn test_corrupt_entry_refuses_to_open() {
    let dir = create_temp_dir();
    let path = dir.path().join("students.log");
    {
        let store = FileStudentStore::open(&path).unwrap();
        store.insert(draft("S1", "Ana")).unwrap();
        store.insert(draft("S2", "Bia")).unwrap();
    }

    let contents = fs::read_to_string(&path).unwrap();
    fs::write(&path, contents.replacen("Ana", "Eva", 1)).unwrap();

    match FileStudentStore::open(&path) {
        Err(StoreError::Corrupted(reason)) => assert!(reason.contains("entry 1")),
        Err(other) => panic!("expected corruption, got {:?}", other),
        Ok(_) => panic!("expected corruption, store opened"),
    }
}
