//! # UI Controllers
//!
//! Screen state for the student app, independent of any rendering layer:
//! - [`StudentForm`]: create/edit working copy, submit and postal lookup
//! - [`StudentList`]: listing, refresh and confirmed delete
//! - [`details`]: read-only text for the details view and list rows
//!
//! Controllers talk to the backend only through [`crate::client::StudentGateway`].

mod alert;
pub mod details;
mod form;
mod list;

pub use alert::{Alert, DELETE_FAILED, LOAD_FAILED, SAVE_FAILED};
pub use form::StudentForm;
pub use list::{PendingDeletion, StudentList};
