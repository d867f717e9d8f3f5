//! Location capability backed by an IP-geolocation HTTP endpoint.
//!
//! The endpoint is expected to answer a plain GET with a JSON object carrying
//! `latitude`/`longitude` (or `lat`/`lon`). Other fields are ignored.

use std::time::Duration;

use reqwest::{Client, Url};
use worldwise_core::{AppConfig, Position};

use crate::error::GeolocationError;
use crate::geolocation::{Coordinates, GeolocationProvider};

pub struct HttpGeolocationProvider {
    client: Client,
    url: Url,
}

impl HttpGeolocationProvider {
    /// # Errors
    ///
    /// Returns [`GeolocationError::InvalidUrl`] if `url` does not parse, or
    /// [`GeolocationError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeolocationError> {
        let parsed = Url::parse(url).map_err(|e| GeolocationError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: parsed,
        })
    }

    /// Builds a provider when a location endpoint is configured.
    ///
    /// # Errors
    ///
    /// See [`HttpGeolocationProvider::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, GeolocationError> {
        config
            .geolocation_url
            .as_deref()
            .map(|url| Self::new(url, config.request_timeout_secs, &config.user_agent))
            .transpose()
    }
}

impl GeolocationProvider for HttpGeolocationProvider {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        tracing::debug!(url = %self.url, "looking up position");
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Unavailable(format!(
                "location service returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let coordinates: Coordinates =
            serde_json::from_str(&body).map_err(|e| GeolocationError::Deserialize {
                context: self.url.to_string(),
                source: e,
            })?;

        if Position::from_parts(Some(coordinates.latitude), Some(coordinates.longitude)).is_none()
        {
            return Err(GeolocationError::Unavailable(
                "location service returned no usable coordinates".to_owned(),
            ));
        }
        Ok(coordinates)
    }
}
