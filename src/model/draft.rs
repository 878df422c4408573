//! Inbound request body where every field may be missing.
//!
//! The store decides what is required, so the body type must be able to
//! represent an incomplete document instead of failing deserialization.

use serde::{Deserialize, Serialize};

use super::record::{Address, StudentPayload};

/// Address as received, before presence checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Candidate student document for insert and replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<AddressDraft>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

impl From<Address> for AddressDraft {
    fn from(address: Address) -> Self {
        Self {
            zipcode: Some(address.zipcode),
            street: Some(address.street),
            neighborhood: Some(address.neighborhood),
            city: Some(address.city),
            state: Some(address.state),
        }
    }
}

impl From<StudentPayload> for StudentDraft {
    fn from(payload: StudentPayload) -> Self {
        Self {
            student_id: Some(payload.student_id),
            name: Some(payload.name),
            address: Some(payload.address.into()),
            courses: Some(payload.courses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let draft: StudentDraft = serde_json::from_value(json!({"name": "Ana"})).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Ana"));
        assert!(draft.student_id.is_none());
        assert!(draft.address.is_none());
        assert!(draft.courses.is_none());
    }

    #[test]
    fn test_partial_address() {
        let draft: StudentDraft =
            serde_json::from_value(json!({"address": {"city": "SP"}})).unwrap();
        let address = draft.address.unwrap();
        assert_eq!(address.city.as_deref(), Some("SP"));
        assert!(address.zipcode.is_none());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<StudentDraft, _> = serde_json::from_value(json!({"name": 42}));
        assert!(result.is_err());
    }
}
