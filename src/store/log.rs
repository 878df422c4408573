//! Append-only record log used by the durable store.
//!
//! One line per mutation: `<crc32 as 8 hex digits> <json entry>\n`.
//! The checksum covers the JSON bytes only. Replaying the log in order
//! rebuilds the collection; for each id the latest entry wins and a
//! delete entry is a tombstone.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::model::{RecordId, StudentRecord};

use super::collection::StudentCollection;
use super::errors::{StoreError, StoreResult};

/// A persisted mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum LogEntry {
    /// Insert or full replacement
    Put { record: StudentRecord },
    /// Hard delete
    Delete { id: RecordId },
}

impl LogEntry {
    pub fn apply(self, collection: &mut StudentCollection) {
        match self {
            LogEntry::Put { record } => collection.put(record),
            LogEntry::Delete { id } => {
                collection.remove(&id);
            }
        }
    }
}

pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Encodes `entry` as a complete, newline-terminated log line.
pub fn encode_line(entry: &LogEntry) -> StoreResult<String> {
    let json = serde_json::to_string(entry)
        .map_err(|e| StoreError::Internal(format!("Failed to encode log entry: {}", e)))?;
    Ok(format!("{:08x} {}\n", compute_checksum(json.as_bytes()), json))
}

/// Decodes one log line (without its trailing newline).
pub fn decode_line(line: &str) -> StoreResult<LogEntry> {
    let (crc, json) = line
        .split_once(' ')
        .ok_or_else(|| StoreError::Corrupted("log line has no checksum".to_string()))?;

    let expected = u32::from_str_radix(crc, 16)
        .map_err(|_| StoreError::Corrupted(format!("invalid checksum field '{}'", crc)))?;

    if compute_checksum(json.as_bytes()) != expected {
        return Err(StoreError::Corrupted("checksum mismatch".to_string()));
    }

    serde_json::from_str(json)
        .map_err(|e| StoreError::Corrupted(format!("unreadable log entry: {}", e)))
}

/// Result of replaying a log image.
#[derive(Debug)]
pub struct Replay {
    pub collection: StudentCollection,
    /// Number of entries applied
    pub entries: usize,
    /// Length of the valid prefix; anything past it is a torn final write
    pub valid_len: u64,
}

impl Replay {
    pub fn has_torn_tail(&self, file_len: u64) -> bool {
        self.valid_len < file_len
    }
}

/// Replays a whole log image.
///
/// An unterminated final segment is treated as a torn write and excluded
/// from `valid_len`. Any complete line that fails to decode is corruption.
pub fn replay(contents: &[u8]) -> StoreResult<Replay> {
    let mut collection = StudentCollection::new();
    let mut entries = 0;
    let mut valid_len = 0u64;
    let mut rest = contents;

    while let Some(end) = rest.iter().position(|b| *b == b'\n') {
        let entry = std::str::from_utf8(&rest[..end])
            .map_err(|_| StoreError::Corrupted("log line is not UTF-8".to_string()))
            .and_then(decode_line)
            .map_err(|e| match e {
                StoreError::Corrupted(reason) => StoreError::Corrupted(format!(
                    "entry {} at byte {}: {}",
                    entries + 1,
                    valid_len,
                    reason
                )),
                other => other,
            })?;
        entry.apply(&mut collection);
        entries += 1;
        valid_len += (end + 1) as u64;
        rest = &rest[end + 1..];
    }

    Ok(Replay {
        collection,
        entries,
        valid_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;
    use chrono::Utc;

    fn record(student_id: &str) -> StudentRecord {
        let now = Utc::now();
        StudentRecord {
            id: RecordId::generate(),
            student_id: student_id.to_string(),
            name: "Ana".to_string(),
            address: Address {
                zipcode: "12345678".to_string(),
                street: "Rua A".to_string(),
                neighborhood: "Centro".to_string(),
                city: "SP".to_string(),
                state: "SP".to_string(),
            },
            courses: vec!["Math".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_checksum_deterministic() {
        assert_eq!(compute_checksum(b"abc"), compute_checksum(b"abc"));
        assert_ne!(compute_checksum(b"abc"), compute_checksum(b"abd"));
    }

    #[test]
    fn test_line_decodes_to_same_entry() {
        let entry = LogEntry::Put { record: record("S1") };
        let line = encode_line(&entry).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(decode_line(line.trim_end_matches('\n')).unwrap(), entry);
    }

    #[test]
    fn test_tampered_line_is_corrupted() {
        let line = encode_line(&LogEntry::Put { record: record("S1") }).unwrap();
        let tampered = line.trim_end().replace("\"S1\"", "\"S2\"");
        assert!(matches!(decode_line(&tampered), Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn test_replay_latest_wins_and_tombstones() {
        let mut a = record("S1");
        let b = record("S2");
        let mut log = String::new();
        log.push_str(&encode_line(&LogEntry::Put { record: a.clone() }).unwrap());
        log.push_str(&encode_line(&LogEntry::Put { record: b.clone() }).unwrap());
        a.name = "Ana Maria".to_string();
        log.push_str(&encode_line(&LogEntry::Put { record: a.clone() }).unwrap());
        log.push_str(&encode_line(&LogEntry::Delete { id: b.id }).unwrap());

        let replay = replay(log.as_bytes()).unwrap();
        assert_eq!(replay.entries, 4);
        assert_eq!(replay.valid_len, log.len() as u64);
        assert_eq!(replay.collection.records(), &[a]);
    }

    #[test]
    fn test_replay_excludes_torn_tail() {
        let full = encode_line(&LogEntry::Put { record: record("S1") }).unwrap();
        let torn = encode_line(&LogEntry::Put { record: record("S2") }).unwrap();
        let log = format!("{}{}", full, &torn[..torn.len() / 2]);

        let replay = replay(log.as_bytes()).unwrap();
        assert_eq!(replay.entries, 1);
        assert_eq!(replay.valid_len, full.len() as u64);
        assert!(replay.has_torn_tail(log.len() as u64));
    }

    #[test]
    fn test_replay_rejects_corrupt_middle_line() {
        let good = encode_line(&LogEntry::Put { record: record("S1") }).unwrap();
        let log = format!("deadbeef {{}}\n{}", good);
        assert!(matches!(replay(log.as_bytes()), Err(StoreError::Corrupted(_))));
    }
}
