//! Place collection state and its sync with the remote document store.
//!
//! [`RecordStore`] owns the collection and funnels every mutation through
//! [`reduce`]. Remote I/O goes through a [`PlaceBackend`]; [`CitiesClient`]
//! is the HTTP implementation.

pub mod action;
pub mod backend;
pub mod client;
pub mod decode;
pub mod error;
pub mod state;
pub mod store;

pub use action::Action;
pub use backend::PlaceBackend;
pub use client::CitiesClient;
pub use error::{BackendError, DecodeError, RecordDefect};
pub use state::{reduce, reduce_tagged, StoreState};
pub use store::RecordStore;
