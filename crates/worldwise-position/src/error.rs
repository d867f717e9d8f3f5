use thiserror::Error;

/// Errors from a location capability.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device.")]
    Unsupported,

    /// Network or TLS failure reaching a location service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The capability answered but could not produce a position.
    #[error("{0}")]
    Unavailable(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid location service URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
