//! One-shot device location behind an observable `{is_loading, position, error}` state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use tokio::sync::watch;
use worldwise_core::Position;

use crate::error::GeolocationError;

/// A fix as reported by a location capability.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

impl From<Coordinates> for Position {
    fn from(c: Coordinates) -> Self {
        Position::new(c.latitude, c.longitude)
    }
}

/// A one-shot "where am I" capability.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeolocationState {
    pub is_loading: bool,
    /// Last position obtained. Kept when a later request fails.
    pub position: Option<Position>,
    pub error: Option<String>,
    /// Number of requests that resolved to a position. A repeat fix at the
    /// same coordinates still advances it.
    pub resolutions: u64,
}

/// Clears `is_loading` if a request is abandoned before it settles.
struct PendingRequest<'a> {
    state: &'a watch::Sender<GeolocationState>,
    latest_request: &'a AtomicU64,
    request: u64,
    settled: bool,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.state.send_if_modified(|s| {
            if self.latest_request.load(Ordering::SeqCst) != self.request || !s.is_loading {
                return false;
            }
            tracing::debug!(request = self.request, "location request abandoned");
            s.is_loading = false;
            true
        });
    }
}

/// Wraps a [`GeolocationProvider`] so its results can be observed.
///
/// A source built without a provider reports the capability as unsupported.
/// Overlapping requests are last-call-wins: a result that arrives after a
/// newer request started is discarded.
pub struct GeolocationSource<P> {
    provider: Option<P>,
    state: watch::Sender<GeolocationState>,
    latest_request: AtomicU64,
}

impl<P: GeolocationProvider> GeolocationSource<P> {
    pub fn new(provider: Option<P>, default_position: Option<Position>) -> Self {
        let (state, _) = watch::channel(GeolocationState {
            position: default_position,
            ..GeolocationState::default()
        });
        Self {
            provider,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.provider.is_some()
    }

    pub fn state(&self) -> GeolocationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GeolocationState> {
        self.state.subscribe()
    }

    /// Asks the provider for a fix and records the outcome.
    ///
    /// Without a provider this sets `error` immediately and never touches
    /// `is_loading`. Dropping the future before it completes abandons the
    /// request: `is_loading` is cleared unless a newer request has started.
    pub async fn get_position(&self) {
        let Some(provider) = &self.provider else {
            tracing::warn!("position requested but no location capability is available");
            self.state
                .send_modify(|s| s.error = Some(GeolocationError::Unsupported.to_string()));
            return;
        };

        let request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let mut pending = PendingRequest {
            state: &self.state,
            latest_request: &self.latest_request,
            request,
            settled: false,
        };
        let result = provider.current_position().await;
        pending.settled = true;

        // Checked under the channel lock so a newer request cannot slip in
        // between the check and the write.
        self.state.send_if_modified(|s| {
            if self.latest_request.load(Ordering::SeqCst) != request {
                tracing::debug!(request, "discarding superseded location result");
                return false;
            }
            s.is_loading = false;
            match result {
                Ok(coordinates) => {
                    let position = Position::from(coordinates);
                    tracing::info!(%position, "device position resolved");
                    s.position = Some(position);
                    s.resolutions += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "device position unavailable");
                    s.error = Some(e.to_string());
                }
            }
            true
        });
    }
}
