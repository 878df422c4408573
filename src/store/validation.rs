//! Required-field validation for candidate documents.
//!
//! Validation is all-or-nothing: every declared field is checked and all
//! failures are reported together. A candidate that fails is never written.

use crate::model::{Address, AddressDraft, StudentDraft, StudentPayload};

use super::errors::{FieldViolation, StoreError, StoreResult};

const ADDRESS_FIELDS: [&str; 5] = ["zipcode", "street", "neighborhood", "city", "state"];

/// Checks every required field of `draft` and returns the complete document.
///
/// `courses` is optional and defaults to an empty sequence.
///
/// # Errors
///
/// `StoreError::ValidationFailed` naming each missing or empty field, in
/// declaration order.
pub fn validate_draft(draft: StudentDraft) -> StoreResult<StudentPayload> {
    let mut violations = Vec::new();

    let student_id = required(draft.student_id, "studentId", &mut violations);
    let name = required(draft.name, "name", &mut violations);
    let address = validate_address(draft.address, &mut violations);

    if !violations.is_empty() {
        return Err(StoreError::ValidationFailed(violations));
    }

    Ok(StudentPayload {
        student_id,
        name,
        address,
        courses: draft.courses.unwrap_or_default(),
    })
}

fn validate_address(draft: Option<AddressDraft>, violations: &mut Vec<FieldViolation>) -> Address {
    let Some(draft) = draft else {
        violations.extend(
            ADDRESS_FIELDS
                .iter()
                .map(|field| FieldViolation::missing(format!("address.{field}"))),
        );
        return Address::default();
    };

    Address {
        zipcode: required(draft.zipcode, "address.zipcode", violations),
        street: required(draft.street, "address.street", violations),
        neighborhood: required(draft.neighborhood, "address.neighborhood", violations),
        city: required(draft.city, "address.city", violations),
        state: required(draft.state, "address.state", violations),
    }
}

fn required(value: Option<String>, field: &str, violations: &mut Vec<FieldViolation>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        Some(_) => {
            violations.push(FieldViolation::empty(field));
            String::new()
        }
        None => {
            violations.push(FieldViolation::missing(field));
            String::new()
        }
    }
}
