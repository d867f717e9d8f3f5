//! Turning backend documents into [`Place`] records.
//!
//! A collection document is either an object keyed by record key or, when the
//! keys happen to be dense integers, an array with `null` holes. Records that
//! cannot become a [`Place`] are dropped with a warning rather than failing
//! the whole load.
//!
//! Object records come out with array-index keys (`"0"`, `"9"`, `"10"`) first
//! in numeric order, then every other key in byte order.

use serde_json::Value;
use worldwise_core::{Place, PlaceId, Position};

use crate::error::{DecodeError, RecordDefect};

/// Returns `true` for a document that holds no records at all.
#[must_use]
pub fn is_empty_document(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.iter().all(Value::is_null),
        _ => false,
    }
}

/// Decodes every usable record in a collection document.
///
/// # Errors
///
/// Returns [`DecodeError::UnexpectedShape`] when the document is neither an
/// object nor an array. Individual bad records are skipped, not errors.
pub fn decode_collection(document: Value) -> Result<Vec<Place>, DecodeError> {
    let entries: Vec<(String, Value)> = match document {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by_key(|(key, _)| array_index(key).map_or((1, 0), |i| (0, i)));
            entries
        }
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => {
            return Err(DecodeError::UnexpectedShape {
                found: json_kind(&other),
            })
        }
    };

    let total = entries.len();
    let places: Vec<Place> = entries
        .into_iter()
        .filter_map(|(key, value)| {
            match decode_record(PlaceId::Text(key.clone()), value) {
                Ok(place) => Some(place),
                Err(defect) => {
                    tracing::warn!(record_key = %key, reason = %defect, "skipping place record");
                    None
                }
            }
        })
        .collect();

    if places.len() < total {
        tracing::warn!(
            kept = places.len(),
            dropped = total - places.len(),
            "place collection contained unusable records"
        );
    }
    Ok(places)
}

/// Decodes a single record, using `fallback_id` when the body carries no id.
///
/// # Errors
///
/// Returns a [`RecordDefect`] describing why the record is unusable.
pub fn decode_record(fallback_id: PlaceId, value: Value) -> Result<Place, RecordDefect> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(RecordDefect::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    if position_of(&fields).is_none() {
        return Err(RecordDefect::MissingPosition);
    }

    if fields.get("id").is_none_or(Value::is_null) {
        let id = serde_json::to_value(fallback_id).map_err(RecordDefect::InvalidFields)?;
        fields.insert("id".to_owned(), id);
    }

    serde_json::from_value(Value::Object(fields)).map_err(RecordDefect::InvalidFields)
}

/// Parses a key that is a canonical array index: decimal digits, no leading
/// zero, below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    let index = key.parse::<u32>().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

fn position_of(fields: &serde_json::Map<String, Value>) -> Option<Position> {
    let position = fields.get("position")?.as_object()?;
    Position::from_parts(
        position.get("lat").and_then(Value::as_f64),
        position.get("lng").and_then(Value::as_f64),
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
