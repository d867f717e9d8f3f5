//! Precedence rules for the map center, and the navigation it asks for.

use std::fmt;

use url::Url;
use worldwise_core::{Place, PlaceId, Position};

/// Where the UI layer should navigate next.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationIntent {
    /// Open a place's detail page centered on it.
    ShowPlace { id: PlaceId, position: Position },
    /// Open the new-place form prefilled with a clicked position.
    NewPlaceForm { position: Position },
}

impl NavigationIntent {
    #[must_use]
    pub fn show_place(place: &Place) -> Self {
        NavigationIntent::ShowPlace {
            id: place.id.clone(),
            position: place.position,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            NavigationIntent::ShowPlace { position, .. }
            | NavigationIntent::NewPlaceForm { position } => *position,
        }
    }

    /// Resolves the intent against the app's root URL.
    ///
    /// `ShowPlace` goes to `{root}/cities/{id}?lat=..&lng=..`, `NewPlaceForm`
    /// to `{root}/form?lat=..&lng=..`.
    #[must_use]
    pub fn apply_to(&self, app_root: &Url) -> Url {
        let mut url = app_root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match self {
                NavigationIntent::ShowPlace { id, .. } => {
                    segments.push("cities").push(&id.to_string());
                }
                NavigationIntent::NewPlaceForm { .. } => {
                    segments.push("form");
                }
            }
        }
        let position = self.position();
        url.query_pairs_mut()
            .clear()
            .append_pair("lat", &position.lat.to_string())
            .append_pair("lng", &position.lng.to_string());
        url.set_fragment(None);
        url
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationIntent::ShowPlace { id, position } => {
                write!(f, "cities/{id}?lat={}&lng={}", position.lat, position.lng)
            }
            NavigationIntent::NewPlaceForm { position } => {
                write!(f, "form?lat={}&lng={}", position.lat, position.lng)
            }
        }
    }
}

/// Decides the map center.
///
/// On each evaluation a URL position beats a device position. With neither,
/// the center stays where it is; it starts at the default. A click moves the
/// center straight to the clicked point.
#[derive(Debug, Clone)]
pub struct PositionResolver {
    center: Position,
}

impl PositionResolver {
    #[must_use]
    pub fn new(default_center: Position) -> Self {
        Self {
            center: default_center,
        }
    }

    #[must_use]
    pub fn center(&self) -> Position {
        self.center
    }

    /// Re-evaluates the center from the current source values.
    pub fn resolve(&mut self, from_url: Option<Position>, geolocated: Option<Position>) -> Position {
        if let Some(position) = from_url.or(geolocated) {
            self.center = position;
        }
        self.center
    }

    /// Centers on a clicked point and returns the form navigation for it.
    #[must_use]
    pub fn click(&mut self, at: Position) -> NavigationIntent {
        self.center = at;
        NavigationIntent::NewPlaceForm { position: at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Position = Position::new(40.0, 0.0);

    #[test]
    fn url_beats_geolocation() {
        let mut resolver = PositionResolver::new(DEFAULT);
        let center = resolver.resolve(
            Some(Position::new(10.0, 20.0)),
            Some(Position::new(5.0, 5.0)),
        );
        assert_eq!(center, Position::new(10.0, 20.0));
    }

    #[test]
    fn geolocation_used_without_url() {
        let mut resolver = PositionResolver::new(DEFAULT);
        let center = resolver.resolve(None, Some(Position::new(5.0, 5.0)));
        assert_eq!(center, Position::new(5.0, 5.0));
    }

    #[test]
    fn default_without_any_source() {
        let mut resolver = PositionResolver::new(DEFAULT);
        assert_eq!(resolver.resolve(None, None), DEFAULT);
        assert_eq!(resolver.center(), DEFAULT);
    }

    #[test]
    fn losing_all_sources_keeps_last_center() {
        let mut resolver = PositionResolver::new(DEFAULT);
        resolver.resolve(Some(Position::new(10.0, 20.0)), None);
        assert_eq!(resolver.resolve(None, None), Position::new(10.0, 20.0));
    }

    #[test]
    fn click_overrides_everything_until_next_evaluation() {
        let mut resolver = PositionResolver::new(DEFAULT);
        resolver.resolve(Some(Position::new(10.0, 20.0)), Some(Position::new(5.0, 5.0)));

        let intent = resolver.click(Position::new(1.0, 2.0));

        assert_eq!(resolver.center(), Position::new(1.0, 2.0));
        assert_eq!(
            intent,
            NavigationIntent::NewPlaceForm {
                position: Position::new(1.0, 2.0)
            }
        );
        assert_eq!(
            resolver.resolve(Some(Position::new(10.0, 20.0)), None),
            Position::new(10.0, 20.0)
        );
    }

    #[test]
    fn form_intent_url() {
        let root = Url::parse("https://worldwise.test/app").unwrap();
        let intent = NavigationIntent::NewPlaceForm {
            position: Position::new(1.0, 2.5),
        };
        assert_eq!(
            intent.apply_to(&root).as_str(),
            "https://worldwise.test/app/form?lat=1&lng=2.5"
        );
        assert_eq!(intent.to_string(), "form?lat=1&lng=2.5");
    }

    #[test]
    fn show_place_intent_url_replaces_existing_query() {
        let root = Url::parse("https://worldwise.test/app/?lat=0&lng=0").unwrap();
        let place = Place::new(73_930_385_i64, Position::new(38.7, -9.1));
        let intent = NavigationIntent::show_place(&place);
        assert_eq!(
            intent.apply_to(&root).as_str(),
            "https://worldwise.test/app/cities/73930385?lat=38.7&lng=-9.1"
        );
    }

    #[test]
    fn intent_url_round_trips_through_url_position() {
        let root = Url::parse("https://worldwise.test/app").unwrap();
        let position = Position::new(-33.868_820, 151.209_296);
        let url = NavigationIntent::NewPlaceForm { position }.apply_to(&root);
        assert_eq!(crate::position_from_url(&url), Some(position));
    }
}
