//! Stored student document and its client-side body.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// System-assigned record identity.
///
/// Assigned once at insert and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Postal address. All five parts are required by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zipcode: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// A stored student document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Store identity, `_id` on the wire
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,

    /// Business identifier (unique across the store)
    pub student_id: String,

    pub name: String,

    pub address: Address,

    /// Enrolled course names, in submission order
    #[serde(default)]
    pub courses: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl StudentRecord {
    /// The mutable part of this record, as a client would resend it
    pub fn to_payload(&self) -> StudentPayload {
        StudentPayload {
            student_id: self.student_id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            courses: self.courses.clone(),
        }
    }
}

/// Body for create and update requests, as sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub student_id: String,
    pub name: String,
    pub address: Address,
    #[serde(default)]
    pub courses: Vec<String>,
}
