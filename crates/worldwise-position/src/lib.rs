//! Map-center reconciliation.
//!
//! Three sources can move the map: coordinates in the current URL, the
//! device location, and user clicks. [`PositionResolver`] decides which one
//! wins; [`spawn_map_center`] keeps that decision current as the sources
//! change.

pub mod error;
pub mod geolocation;
pub mod ip_lookup;
pub mod map_center;
pub mod resolver;
pub mod url_position;

pub use error::GeolocationError;
pub use geolocation::{Coordinates, GeolocationProvider, GeolocationSource, GeolocationState};
pub use ip_lookup::HttpGeolocationProvider;
pub use map_center::{spawn_map_center, MapCenter};
pub use resolver::{NavigationIntent, PositionResolver};
pub use url_position::{position_from_url, UrlPositionSource};
