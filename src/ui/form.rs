//! # Student Form
//!
//! Working copy of one record being created or edited. Fields are changed
//! through named setters; the courses list has a separate free-text input
//! that only becomes the canonical list when [`StudentForm::commit_courses`]
//! runs (the input losing focus).

use tracing::{debug, warn};

use crate::client::{
    normalize_zipcode, LookupOutcome, PostalCodeLookup, PostalLookupError, StudentGateway,
};
use crate::model::{StudentPayload, StudentRecord};

use super::alert::{Alert, SAVE_FAILED};

/// Editable state for the create/edit screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    existing_id: Option<String>,
    working: StudentPayload,
    courses_input: String,
}

impl StudentForm {
    /// Blank form; submitting creates a record
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated from `record`; submitting updates it
    pub fn edit(record: &StudentRecord) -> Self {
        Self {
            existing_id: Some(record.id.to_string()),
            working: record.to_payload(),
            courses_input: record.courses.join(", "),
        }
    }

    pub fn existing_id(&self) -> Option<&str> {
        self.existing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.existing_id.is_some()
    }

    /// Current working copy
    pub fn payload(&self) -> &StudentPayload {
        &self.working
    }

    pub fn courses_input(&self) -> &str {
        &self.courses_input
    }

    // ==================
    // Setters
    // ==================

    pub fn set_student_id(&mut self, value: impl Into<String>) {
        self.working.student_id = value.into();
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.working.name = value.into();
    }

    pub fn set_zipcode(&mut self, value: impl Into<String>) {
        self.working.address.zipcode = value.into();
    }

    pub fn set_street(&mut self, value: impl Into<String>) {
        self.working.address.street = value.into();
    }

    pub fn set_neighborhood(&mut self, value: impl Into<String>) {
        self.working.address.neighborhood = value.into();
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.working.address.city = value.into();
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        self.working.address.state = value.into();
    }

    /// Edit the free-text courses input without touching the course list
    pub fn set_courses_input(&mut self, value: impl Into<String>) {
        self.courses_input = value.into();
    }

    /// Split the courses input on commas into the course list
    pub fn commit_courses(&mut self) {
        self.working.courses = self
            .courses_input
            .split(',')
            .map(str::trim)
            .filter(|course| !course.is_empty())
            .map(String::from)
            .collect();
    }

    // ==================
    // Validation
    // ==================

    /// Required fields that are currently empty, as wire paths
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let payload = &self.working;
        let address = &payload.address;
        [
            ("studentId", &payload.student_id),
            ("name", &payload.name),
            ("address.zipcode", &address.zipcode),
            ("address.street", &address.street),
            ("address.neighborhood", &address.neighborhood),
            ("address.city", &address.city),
            ("address.state", &address.state),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn can_submit(&self) -> bool {
        self.missing_fields().is_empty()
    }

    // ==================
    // Actions
    // ==================

    /// Create or update depending on whether the form was opened for edit.
    /// On success the caller returns to the previous view.
    pub async fn submit<G: StudentGateway>(&self, gateway: &G) -> Result<StudentRecord, Alert> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Alert::new(
                "Missing fields",
                format!("Fill in: {}", missing.join(", ")),
            ));
        }

        let result = match &self.existing_id {
            Some(id) => gateway.update(id, &self.working).await,
            None => gateway.create(&self.working).await,
        };

        result.map_err(|e| {
            warn!(error = %e, "submit failed");
            Alert::from_client(&e, SAVE_FAILED)
        })
    }

    /// Fill street, neighborhood, city and state from the postal-code
    /// service. A not-found answer leaves the address untouched.
    pub async fn lookup_postal_code<L: PostalCodeLookup>(
        &mut self,
        lookup: &L,
    ) -> Result<LookupOutcome, Alert> {
        let zipcode = normalize_zipcode(&self.working.address.zipcode).map_err(|_| {
            Alert::new("Invalid zipcode", "The zipcode must have 8 digits.")
        })?;

        let outcome = lookup.lookup(&zipcode).await.map_err(|e| {
            warn!(error = %e, "postal lookup failed");
            match e {
                PostalLookupError::InvalidZipcode(_) => {
                    Alert::new("Invalid zipcode", "The zipcode must have 8 digits.")
                }
                _ => Alert::new("Error", "Could not look up the zipcode."),
            }
        })?;

        if let LookupOutcome::Found(found) = &outcome {
            debug!(%zipcode, "postal lookup filled address");
            let address = &mut self.working.address;
            address.zipcode = zipcode;
            overwrite_unless_empty(&mut address.street, &found.street);
            overwrite_unless_empty(&mut address.neighborhood, &found.neighborhood);
            overwrite_unless_empty(&mut address.city, &found.city);
            overwrite_unless_empty(&mut address.state, &found.state);
        }

        Ok(outcome)
    }
}

fn overwrite_unless_empty(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}
