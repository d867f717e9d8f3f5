//! Store state and the reducer that advances it.

use serde::Serialize;
use worldwise_core::Place;

use crate::action::Action;

/// Snapshot of the place collection and the status of the last request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreState {
    /// Places in the order the store received them.
    pub places: Vec<Place>,
    /// `true` between a `loading` transition and the next terminal one.
    ///
    /// Shared by every operation, so the completion of one request clears it
    /// even while another is still in flight.
    pub is_loading: bool,
    /// The most recently fetched single place.
    pub selected: Option<Place>,
    /// User-facing message from the last failed operation.
    pub error: Option<String>,
}

impl StoreState {
    /// Places ordered by country for display. The stored order is untouched.
    #[must_use]
    pub fn places_by_country(&self) -> Vec<&Place> {
        let mut sorted: Vec<&Place> = self.places.iter().collect();
        sorted.sort_by(|a, b| a.country.cmp(&b.country));
        sorted
    }
}

/// Applies one action to the state and returns the next state.
#[must_use]
pub fn reduce(mut state: StoreState, action: Action) -> StoreState {
    match action {
        Action::Loading => {
            state.is_loading = true;
            state.error = None;
        }
        Action::PlacesLoaded(places) => {
            state.is_loading = false;
            state.places = places;
        }
        Action::PlaceLoaded(place) => {
            state.is_loading = false;
            state.selected = Some(place);
        }
        Action::PlaceCreated(place) => {
            state.is_loading = false;
            state.places.push(place);
        }
        Action::PlaceDeleted(id) => {
            state.is_loading = false;
            state.places.retain(|place| place.id != id);
        }
        Action::Rejected(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        Action::Settled => {
            state.is_loading = false;
        }
    }
    state
}

/// Applies an action given in its serialized `{"type", "payload"}` form.
///
/// # Panics
///
/// Panics if the tag is not one of [`Action::TAGS`] or the payload does not
/// fit the tag. Either means a caller is wired to the wrong action set, and
/// carrying on would leave the state silently out of step.
#[must_use]
pub fn reduce_tagged(state: StoreState, raw: serde_json::Value) -> StoreState {
    let tag = raw
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<missing>")
        .to_owned();
    match serde_json::from_value::<Action>(raw) {
        Ok(action) => reduce(state, action),
        Err(e) if Action::TAGS.contains(&tag.as_str()) => {
            panic!("malformed payload for action type {tag}: {e}")
        }
        Err(_) => panic!("unhandled action type: {tag}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use worldwise_core::{PlaceId, Position};

    use super::*;

    fn place(id: &str, country: Option<&str>) -> Place {
        let mut p = Place::new(id, Position::new(1.0, 2.0));
        p.country = country.map(str::to_owned);
        p
    }

    fn loaded(ids: &[&str]) -> StoreState {
        reduce(
            StoreState::default(),
            Action::PlacesLoaded(ids.iter().map(|id| place(id, None)).collect()),
        )
    }

    #[test]
    fn loading_sets_flag_and_clears_error() {
        let state = StoreState {
            error: Some("old failure".to_owned()),
            ..StoreState::default()
        };
        let next = reduce(state, Action::Loading);
        assert!(next.is_loading);
        assert!(next.error.is_none());
    }

    #[test]
    fn places_loaded_replaces_collection() {
        let state = reduce(loaded(&["a", "b"]), Action::Loading);
        let next = reduce(state, Action::PlacesLoaded(vec![place("c", None)]));
        assert!(!next.is_loading);
        assert_eq!(next.places, vec![place("c", None)]);
    }

    #[test]
    fn place_loaded_sets_selected_only() {
        let state = reduce(loaded(&["a"]), Action::Loading);
        let next = reduce(state, Action::PlaceLoaded(place("z", None)));
        assert!(!next.is_loading);
        assert_eq!(next.selected, Some(place("z", None)));
        assert_eq!(next.places.len(), 1);
    }

    #[test]
    fn place_created_appends() {
        let next = reduce(loaded(&["a", "b"]), Action::PlaceCreated(place("c", None)));
        let ids: Vec<String> = next.places.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn place_deleted_removes_only_matching_id_and_keeps_order() {
        let next = reduce(
            loaded(&["a", "b", "c", "d"]),
            Action::PlaceDeleted(PlaceId::from("b")),
        );
        let ids: Vec<String> = next.places.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }

    #[test]
    fn place_deleted_does_not_match_ids_of_another_shape() {
        let state = reduce(
            StoreState::default(),
            Action::PlacesLoaded(vec![Place::new(7_i64, Position::new(0.0, 0.0))]),
        );
        let next = reduce(state, Action::PlaceDeleted(PlaceId::from("7")));
        assert_eq!(next.places.len(), 1);
    }

    #[test]
    fn rejected_records_message_and_keeps_places() {
        let state = reduce(loaded(&["a"]), Action::Loading);
        let next = reduce(state, Action::Rejected("nope".to_owned()));
        assert!(!next.is_loading);
        assert_eq!(next.error.as_deref(), Some("nope"));
        assert_eq!(next.places.len(), 1);
    }

    #[test]
    fn settled_only_clears_loading() {
        let state = reduce(loaded(&["a"]), Action::Loading);
        let next = reduce(state.clone(), Action::Settled);
        assert!(!next.is_loading);
        assert_eq!(next.places, state.places);
        assert_eq!(next.selected, state.selected);
        assert_eq!(next.error, state.error);
    }

    #[test]
    fn places_by_country_sorts_a_view() {
        let state = reduce(
            StoreState::default(),
            Action::PlacesLoaded(vec![
                place("lisbon", Some("Portugal")),
                place("madrid", Some("Spain")),
                place("berlin", Some("Germany")),
                place("porto", Some("Portugal")),
            ]),
        );
        let sorted: Vec<String> = state
            .places_by_country()
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(sorted, ["berlin", "lisbon", "porto", "madrid"]);
        assert_eq!(state.places[0].id, PlaceId::from("lisbon"));
    }

    #[test]
    fn reduce_tagged_applies_known_actions() {
        let next = reduce_tagged(
            loaded(&["a", "b"]),
            json!({ "type": "city/deleted", "payload": "a" }),
        );
        assert_eq!(next.places.len(), 1);
        assert_eq!(next.places[0].id, PlaceId::from("b"));
    }

    #[test]
    #[should_panic(expected = "unhandled action type: city/renamed")]
    fn reduce_tagged_panics_on_unknown_action() {
        let _ = reduce_tagged(
            StoreState::default(),
            json!({ "type": "city/renamed", "payload": "a" }),
        );
    }

    #[test]
    #[should_panic(expected = "malformed payload for action type cities/loaded")]
    fn reduce_tagged_panics_on_malformed_payload() {
        let _ = reduce_tagged(
            StoreState::default(),
            json!({ "type": "cities/loaded", "payload": "not a list" }),
        );
    }
}
