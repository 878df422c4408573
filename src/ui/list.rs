//! # Student List
//!
//! Listing of every record with manual refresh and a two-step delete:
//! [`StudentList::request_delete`] names the record, and only
//! [`StudentList::confirm_delete`] issues the call, followed by a re-fetch.

use tracing::{info, warn};

use crate::client::StudentGateway;
use crate::model::StudentRecord;

use super::alert::{Alert, DELETE_FAILED, LOAD_FAILED};

/// Delete awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub id: String,
    pub name: String,
}

impl PendingDeletion {
    /// Confirmation question shown to the user
    pub fn prompt(&self) -> String {
        format!("Delete {}?", self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentList {
    records: Vec<StudentRecord>,
    loaded: bool,
    pending: Option<PendingDeletion>,
}

impl StudentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Whether a fetch has ever succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    /// Screen became visible
    pub async fn on_visible<G: StudentGateway>(&mut self, gateway: &G) -> Result<(), Alert> {
        self.refresh(gateway).await
    }

    /// Re-fetch every record. On failure the previous listing is kept.
    pub async fn refresh<G: StudentGateway>(&mut self, gateway: &G) -> Result<(), Alert> {
        match gateway.fetch_all().await {
            Ok(records) => {
                self.records = records;
                self.loaded = true;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load students");
                Err(Alert::from_client(&e, LOAD_FAILED))
            }
        }
    }

    /// Ask for confirmation before deleting record `id`. Returns `None`
    /// when the id is not in the current listing.
    pub fn request_delete(&mut self, id: &str) -> Option<&PendingDeletion> {
        let record = self.records.iter().find(|r| r.id.to_string() == id)?;
        self.pending = Some(PendingDeletion {
            id: id.to_string(),
            name: record.name.clone(),
        });
        self.pending.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending = None;
    }

    /// Delete the pending record, then re-fetch. Returns `Ok(false)` when
    /// nothing was awaiting confirmation.
    pub async fn confirm_delete<G: StudentGateway>(&mut self, gateway: &G) -> Result<bool, Alert> {
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };

        if let Err(e) = gateway.remove(&pending.id).await {
            warn!(id = %pending.id, error = %e, "delete failed");
            return Err(Alert::from_client(&e, DELETE_FAILED));
        }
        info!(id = %pending.id, "student deleted");

        self.refresh(gateway).await?;
        Ok(true)
    }
}
