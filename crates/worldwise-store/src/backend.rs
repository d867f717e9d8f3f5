//! The persistence seam the store talks to.

use std::future::Future;

use worldwise_core::{Place, PlaceId};

use crate::error::BackendError;

/// A key-addressed JSON document store holding place records.
///
/// Documents come back undecoded; `Ok(None)` means the store holds nothing
/// at that key. Writes are last-write-wins per key.
pub trait PlaceBackend: Send + Sync {
    /// Fetches the whole collection document.
    fn fetch_all(
        &self,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, BackendError>> + Send;

    /// Fetches the document stored under `id`.
    fn fetch_one(
        &self,
        id: &PlaceId,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, BackendError>> + Send;

    /// Writes `place` under its own id, replacing whatever was there.
    fn put(&self, place: &Place) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn delete(&self, id: &PlaceId) -> impl Future<Output = Result<(), BackendError>> + Send;
}
