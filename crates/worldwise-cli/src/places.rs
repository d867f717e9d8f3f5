//! Place command handlers for the CLI.
//!
//! Each handler drives one [`RecordStore`] operation and then inspects the
//! resulting state, since the store reports failures through `error` rather
//! than a return value.

use chrono::Utc;
use clap::{Args, Subcommand};
use worldwise_core::{Place, PlaceId, Position};
use worldwise_store::{PlaceBackend, RecordStore, StoreState};

/// Sub-commands available under `places`.
#[derive(Debug, Subcommand)]
pub enum PlacesCommands {
    /// List every place, grouped by country
    List,
    /// Show a single place
    Show {
        /// Place id as stored in the backend
        id: String,
    },
    /// Record a new visited place
    Add(AddArgs),
    /// Delete a place
    Delete {
        /// Place id as shown by `places list`
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// City name
    #[arg(long)]
    pub name: String,
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
    /// Flag emoji for the country
    #[arg(long)]
    pub emoji: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

/// Turns a failed store operation into an error carrying its message.
fn ensure_ok(state: &StoreState) -> anyhow::Result<()> {
    match &state.error {
        Some(message) => anyhow::bail!("{message}"),
        None => Ok(()),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("\u{2014}")
}

/// Finds the stored id whose display form is `raw`.
///
/// Ids keep their JSON shape, so `7` and `"7"` are different places; the
/// command line can only carry the text.
fn resolve_id(state: &StoreState, raw: &str) -> Option<PlaceId> {
    state
        .places
        .iter()
        .find(|place| place.id.to_string() == raw)
        .map(|place| place.id.clone())
}

/// Print every place, ordered by country.
///
/// # Errors
///
/// Returns an error if the collection could not be loaded.
pub(crate) async fn run_list<B: PlaceBackend>(store: &RecordStore<B>) -> anyhow::Result<()> {
    store.load_all().await;
    let state = store.snapshot();
    ensure_ok(&state)?;

    if state.places.is_empty() {
        println!("no places recorded yet; add one with `places add`");
        return Ok(());
    }

    let header = format!("{:<38}{:<20}{:<16}POSITION", "ID", "CITY", "COUNTRY");
    println!("{header}");
    for place in state.places_by_country() {
        let city = match (&place.emoji, &place.city_name) {
            (Some(emoji), Some(name)) => format!("{emoji} {name}"),
            (None, Some(name)) => name.clone(),
            _ => "\u{2014}".to_string(),
        };
        println!(
            "{:<38}{:<20}{:<16}{}",
            place.id.to_string(),
            city,
            or_dash(place.country.as_deref()),
            place.position
        );
    }

    Ok(())
}

/// Print one place in full.
///
/// # Errors
///
/// Returns an error if the lookup fails or no such place exists.
pub(crate) async fn run_show<B: PlaceBackend>(
    store: &RecordStore<B>,
    id: &str,
) -> anyhow::Result<()> {
    store.load_one(&PlaceId::from(id)).await;
    let state = store.snapshot();
    ensure_ok(&state)?;

    let place = state
        .selected
        .ok_or_else(|| anyhow::anyhow!("place '{id}' not found"))?;

    println!("Place: {}", place.id);
    println!("City: {}", or_dash(place.city_name.as_deref()));
    println!("Country: {}", or_dash(place.country.as_deref()));
    println!("Position: {}", place.position);
    println!("Visited: {}", or_dash(place.date.as_deref()));
    if let Some(notes) = &place.notes {
        println!();
        println!("{notes}");
    }

    Ok(())
}

/// Build the record `places add` writes. The id is a fresh v4 UUID and the
/// visit is stamped with the current time.
pub(crate) fn new_place(args: AddArgs) -> Place {
    let mut place = Place::new(
        uuid::Uuid::new_v4().to_string(),
        Position::new(args.lat, args.lng),
    );
    place.city_name = Some(args.name);
    place.emoji = args.emoji;
    place.country = args.country;
    place.notes = args.notes;
    place.date = Some(Utc::now().to_rfc3339());
    place
}

/// Create a place from command-line fields.
///
/// # Errors
///
/// Returns an error if the backend write fails.
pub(crate) async fn run_add<B: PlaceBackend>(
    store: &RecordStore<B>,
    args: AddArgs,
) -> anyhow::Result<()> {
    let place = new_place(args);
    let id = place.id.clone();
    store.create(place).await;
    ensure_ok(&store.snapshot())?;
    tracing::info!(%id, "place added");
    println!("added place {id}");
    Ok(())
}

/// Delete a place by the id shown in `places list`.
///
/// # Errors
///
/// Returns an error if loading or deleting fails, or no place has that id.
pub(crate) async fn run_delete<B: PlaceBackend>(
    store: &RecordStore<B>,
    raw_id: &str,
) -> anyhow::Result<()> {
    store.load_all().await;
    let state = store.snapshot();
    ensure_ok(&state)?;

    let id = resolve_id(&state, raw_id)
        .ok_or_else(|| anyhow::anyhow!("place '{raw_id}' not found; run `places list`"))?;

    store.delete(&id).await;
    ensure_ok(&store.snapshot())?;
    tracing::info!(%id, "place deleted");
    println!("deleted place {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use worldwise_store::{reduce, Action};

    use super::*;

    #[test]
    fn resolve_id_keeps_stored_shape() {
        let state = reduce(
            StoreState::default(),
            Action::PlacesLoaded(vec![
                Place::new(7_i64, Position::new(0.0, 0.0)),
                Place::new("abc", Position::new(1.0, 1.0)),
            ]),
        );
        assert_eq!(resolve_id(&state, "7"), Some(PlaceId::from(7_i64)));
        assert_eq!(resolve_id(&state, "abc"), Some(PlaceId::from("abc")));
        assert_eq!(resolve_id(&state, "missing"), None);
    }

    #[test]
    fn ensure_ok_surfaces_store_error() {
        let state = reduce(
            StoreState::default(),
            Action::Rejected("There was an error loading cities...".to_owned()),
        );
        let err = ensure_ok(&state).unwrap_err();
        assert_eq!(err.to_string(), "There was an error loading cities...");
        assert!(ensure_ok(&StoreState::default()).is_ok());
    }

    #[test]
    fn new_place_fills_descriptive_fields() {
        let place = new_place(AddArgs {
            name: "Lisbon".to_owned(),
            lat: 38.72,
            lng: -9.14,
            emoji: Some("🇵🇹".to_owned()),
            country: Some("Portugal".to_owned()),
            notes: None,
        });
        assert_eq!(place.position, Position::new(38.72, -9.14));
        assert_eq!(place.city_name.as_deref(), Some("Lisbon"));
        assert_eq!(place.country.as_deref(), Some("Portugal"));
        assert!(place.date.is_some());
        assert!(matches!(place.id, PlaceId::Text(ref s) if uuid::Uuid::parse_str(s).is_ok()));
    }
}
