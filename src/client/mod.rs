//! # Client Data Access
//!
//! Typed access to the student service and the postal-code lookup used by
//! the UI controllers. Both sit behind traits so controllers can be driven
//! by in-process fakes.

mod api;
mod errors;
mod postal;

use std::future::Future;

use crate::model::{StudentPayload, StudentRecord};

pub use api::StudentApi;
pub use errors::{ClientError, ClientResult, PostalLookupError};
pub use postal::{
    normalize_zipcode, LookupOutcome, PostalAddress, PostalCodeLookup, ViaCepLookup,
    DEFAULT_LOOKUP_URL,
};

/// Remote student collection as seen by the UI
pub trait StudentGateway: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = ClientResult<Vec<StudentRecord>>> + Send;

    fn create(
        &self,
        payload: &StudentPayload,
    ) -> impl Future<Output = ClientResult<StudentRecord>> + Send;

    fn update(
        &self,
        id: &str,
        payload: &StudentPayload,
    ) -> impl Future<Output = ClientResult<StudentRecord>> + Send;

    fn remove(&self, id: &str) -> impl Future<Output = ClientResult<()>> + Send;
}
