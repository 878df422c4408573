//! # Student Model
//!
//! The single entity of the system and the request shapes that carry it.
//!
//! - [`StudentRecord`]: a stored document, with identity and timestamps
//! - [`StudentPayload`]: the fully-populated body a client sends
//! - [`StudentDraft`]: the server-side view of a body, where any field may be absent

mod draft;
mod record;

pub use draft::{AddressDraft, StudentDraft};
pub use record::{Address, RecordId, StudentPayload, StudentRecord};
