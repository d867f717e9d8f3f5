//! Map position carried in the `lat`/`lng` query parameters of the current URL.

use tokio::sync::watch;
use url::Url;
use worldwise_core::Position;

/// Reads `lat` and `lng` from `url`'s query.
///
/// Returns `None` unless both are present and parse as finite numbers. Only
/// the first occurrence of each parameter counts.
#[must_use]
pub fn position_from_url(url: &Url) -> Option<Position> {
    Position::from_parts(query_number(url, "lat"), query_number(url, "lng"))
}

fn query_number(url: &Url, name: &str) -> Option<f64> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.trim().parse::<f64>().ok())
}

/// Live view of the URL position.
///
/// Wraps the receiving end of whatever owns navigation. Every read looks at
/// the URL as it is now.
pub struct UrlPositionSource {
    location: watch::Receiver<Url>,
}

impl UrlPositionSource {
    pub fn new(location: watch::Receiver<Url>) -> Self {
        Self { location }
    }

    /// Position in the current URL.
    pub fn current(&self) -> Option<Position> {
        position_from_url(&self.location.borrow())
    }

    /// Waits for the next navigation and returns the position it carries.
    ///
    /// # Errors
    ///
    /// Returns an error once the navigation owner has gone away.
    pub async fn changed(&mut self) -> Result<Option<Position>, watch::error::RecvError> {
        self.location.changed().await?;
        Ok(position_from_url(&self.location.borrow_and_update()))
    }
}
