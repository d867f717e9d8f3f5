//! HTTP client for the key-addressed JSON document store.
//!
//! The store exposes the collection at `{base}/cities.json` and each record
//! at `{base}/cities/{id}.json`. Reads return `null` for missing keys; writes
//! are `PUT` of the whole record.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use worldwise_core::{AppConfig, Place, PlaceId};

use crate::backend::PlaceBackend;
use crate::error::BackendError;

const COLLECTION: &str = "cities";

/// [`PlaceBackend`] over HTTP.
///
/// Use [`CitiesClient::new`] with the production root or a wiremock
/// server URI in tests.
pub struct CitiesClient {
    client: Client,
    base_url: Url,
}

impl CitiesClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BackendError::InvalidBaseUrl`] if
    /// `base_url` is not a URL that can carry a path.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash; record paths are pushed
        // after popping the empty final segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| BackendError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`CitiesClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        Self::new(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&format!("{COLLECTION}.json"));
        }
        url
    }

    /// Builds the record URL. The id is percent-encoded as a single segment.
    fn record_url(&self, id: &PlaceId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(COLLECTION)
                .push(&format!("{id}.json"));
        }
        url
    }

    /// Sends a GET and parses the body, mapping `null` or an empty body to `None`.
    async fn get_document(&self, url: Url) -> Result<Option<serde_json::Value>, BackendError> {
        tracing::debug!(%url, "fetching document");
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(response)?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| BackendError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok((!value.is_null()).then_some(value))
    }

    fn check_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

impl PlaceBackend for CitiesClient {
    async fn fetch_all(&self) -> Result<Option<serde_json::Value>, BackendError> {
        self.get_document(self.collection_url()).await
    }

    async fn fetch_one(&self, id: &PlaceId) -> Result<Option<serde_json::Value>, BackendError> {
        self.get_document(self.record_url(id)).await
    }

    async fn put(&self, place: &Place) -> Result<(), BackendError> {
        let url = self.record_url(&place.id);
        tracing::debug!(%url, place_id = %place.id, "writing place");
        let response = self.client.put(url).json(place).send().await?;
        // The store echoes the record back; nothing in it is needed.
        Self::check_status(response)?;
        Ok(())
    }

    async fn delete(&self, id: &PlaceId) -> Result<(), BackendError> {
        let url = self.record_url(id);
        tracing::debug!(%url, place_id = %id, "deleting place");
        let response = self.client.delete(url).send().await?;
        Self::check_status(response)?;
        Ok(())
    }
}
