//! State transitions understood by the store reducer.

use serde::{Deserialize, Serialize};
use worldwise_core::{Place, PlaceId};

/// A single state transition.
///
/// Serialized adjacently tagged as `{"type": ..., "payload": ...}` so an
/// action log can be written out and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    /// A request went out. Clears the previous error.
    #[serde(rename = "loading")]
    Loading,
    #[serde(rename = "cities/loaded")]
    PlacesLoaded(Vec<Place>),
    #[serde(rename = "city/loaded")]
    PlaceLoaded(Place),
    #[serde(rename = "city/created")]
    PlaceCreated(Place),
    #[serde(rename = "city/deleted")]
    PlaceDeleted(PlaceId),
    #[serde(rename = "rejected")]
    Rejected(String),
    /// A request finished with nothing to apply.
    #[serde(rename = "settled")]
    Settled,
}

impl Action {
    /// Every tag a serialized action may carry.
    pub const TAGS: [&'static str; 7] = [
        "loading",
        "cities/loaded",
        "city/loaded",
        "city/created",
        "city/deleted",
        "rejected",
        "settled",
    ];

    /// The wire tag of this action.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Loading => "loading",
            Action::PlacesLoaded(_) => "cities/loaded",
            Action::PlaceLoaded(_) => "city/loaded",
            Action::PlaceCreated(_) => "city/created",
            Action::PlaceDeleted(_) => "city/deleted",
            Action::Rejected(_) => "rejected",
            Action::Settled => "settled",
        }
    }
}
