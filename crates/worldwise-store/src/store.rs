//! The place collection and the operations that sync it with the backend.
//!
//! Every operation dispatches `loading` first and exactly one terminal action
//! afterwards. Failures never escape: they become a `rejected` transition
//! carrying a fixed user-facing message, and the cause is logged.

use tokio::sync::watch;
use worldwise_core::{Place, PlaceId};

use crate::action::Action;
use crate::backend::PlaceBackend;
use crate::decode::{decode_collection, decode_record, is_empty_document};
use crate::state::{reduce, reduce_tagged, StoreState};

pub const LOAD_ALL_FAILED: &str = "There was an error loading cities...";
pub const LOAD_ONE_FAILED: &str = "There was an error loading the city...";
pub const CREATE_FAILED: &str = "There was an error creating the city...";
pub const DELETE_FAILED: &str = "There was an error deleting the city...";

/// Owner of the place collection.
///
/// Construct one per session and hand references to whatever renders it.
/// State changes only through [`RecordStore::dispatch`]; readers get owned
/// snapshots or a [`watch::Receiver`].
///
/// Operations take `&self` and may run concurrently. They share one
/// `is_loading` flag, so whichever completes last decides its value.
pub struct RecordStore<B> {
    backend: B,
    state: watch::Sender<StoreState>,
}

impl<B: PlaceBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { backend, state }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. Every dispatch notifies receivers.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Applies one action. This is the only way the state changes.
    pub fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.tag(), "dispatch");
        self.state
            .send_modify(|state| *state = reduce(std::mem::take(state), action));
    }

    /// Applies an action given in serialized form, e.g. from a replay log.
    ///
    /// # Panics
    ///
    /// Panics on an unknown action tag or a payload that does not match its
    /// tag. See [`reduce_tagged`].
    pub fn dispatch_tagged(&self, raw: serde_json::Value) {
        self.state
            .send_modify(|state| *state = reduce_tagged(std::mem::take(state), raw));
    }

    /// Fetches the whole collection, dropping records without a usable position.
    ///
    /// An empty or `null` document leaves the collection as it was.
    pub async fn load_all(&self) {
        self.dispatch(Action::Loading);

        let document = match self.backend.fetch_all().await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch places");
                self.dispatch(Action::Rejected(LOAD_ALL_FAILED.to_owned()));
                return;
            }
        };

        let document = match document {
            Some(document) if !is_empty_document(&document) => document,
            _ => {
                tracing::debug!("backend holds no places");
                self.dispatch(Action::Settled);
                return;
            }
        };

        match decode_collection(document) {
            Ok(places) => {
                tracing::info!(count = places.len(), "loaded places");
                self.dispatch(Action::PlacesLoaded(places));
            }
            Err(e) => {
                tracing::error!(error = %e, "place collection has an unexpected shape");
                self.dispatch(Action::Rejected(LOAD_ALL_FAILED.to_owned()));
            }
        }
    }

    /// Fetches one place into `selected`.
    ///
    /// A missing or unusable record leaves `selected` unchanged and clears
    /// the loading flag.
    pub async fn load_one(&self, id: &PlaceId) {
        self.dispatch(Action::Loading);

        match self.backend.fetch_one(id).await {
            Ok(Some(document)) => match decode_record(id.clone(), document) {
                Ok(place) => self.dispatch(Action::PlaceLoaded(place)),
                Err(defect) => {
                    tracing::warn!(place_id = %id, reason = %defect, "ignoring unusable place record");
                    self.dispatch(Action::Settled);
                }
            },
            Ok(None) => {
                tracing::debug!(place_id = %id, "no place stored under id");
                self.dispatch(Action::Settled);
            }
            Err(e) => {
                tracing::error!(place_id = %id, error = %e, "failed to fetch place");
                self.dispatch(Action::Rejected(LOAD_ONE_FAILED.to_owned()));
            }
        }
    }

    /// Writes `place` under its id and appends it once the write succeeds.
    ///
    /// The backend's response body is not read back.
    pub async fn create(&self, place: Place) {
        self.dispatch(Action::Loading);

        if !place.position.lat.is_finite() || !place.position.lng.is_finite() {
            tracing::warn!(
                place_id = %place.id,
                position = %place.position,
                "refusing to store a place without a usable position"
            );
            self.dispatch(Action::Rejected(CREATE_FAILED.to_owned()));
            return;
        }

        match self.backend.put(&place).await {
            Ok(()) => {
                tracing::info!(place_id = %place.id, "created place");
                self.dispatch(Action::PlaceCreated(place));
            }
            Err(e) => {
                tracing::error!(place_id = %place.id, error = %e, "failed to create place");
                self.dispatch(Action::Rejected(CREATE_FAILED.to_owned()));
            }
        }
    }

    /// Deletes the place stored under `id`.
    pub async fn delete(&self, id: &PlaceId) {
        self.dispatch(Action::Loading);

        match self.backend.delete(id).await {
            Ok(()) => {
                tracing::info!(place_id = %id, "deleted place");
                self.dispatch(Action::PlaceDeleted(id.clone()));
            }
            Err(e) => {
                tracing::error!(place_id = %id, error = %e, "failed to delete place");
                self.dispatch(Action::Rejected(DELETE_FAILED.to_owned()));
            }
        }
    }
}
