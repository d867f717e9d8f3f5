//! Domain types for visited places.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a position only when both halves are present and finite.
    ///
    /// A partial pair is treated as no position at all.
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Identifier of a place record.
///
/// The backend stores ids either as JSON strings or JSON numbers of any
/// size or precision. The original shape is kept so that a record written
/// back round-trips unchanged, and ids of different shapes are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceId::Number(n) => write!(f, "{n}"),
            PlaceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PlaceId {
    fn from(s: &str) -> Self {
        PlaceId::Text(s.to_owned())
    }
}

impl From<String> for PlaceId {
    fn from(s: String) -> Self {
        PlaceId::Text(s)
    }
}

impl From<i64> for PlaceId {
    fn from(n: i64) -> Self {
        PlaceId::Number(n.into())
    }
}

impl From<serde_json::Number> for PlaceId {
    fn from(n: serde_json::Number) -> Self {
        PlaceId::Number(n)
    }
}

/// A visited-place record.
///
/// Only `id` and `position` carry meaning for the sync layer. The descriptive
/// fields and anything else the backend stores are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Fields this crate does not model, kept for round-tripping.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Place {
    /// Creates a place with only the required fields set.
    pub fn new(id: impl Into<PlaceId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            city_name: None,
            emoji: None,
            country: None,
            date: None,
            notes: None,
            extra: serde_json::Map::new(),
        }
    }
}
