use thiserror::Error;

/// Errors returned by a [`crate::PlaceBackend`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// A collection document that cannot be read as a set of records at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected an object or array of places, found {found}")]
    UnexpectedShape { found: &'static str },
}

/// Why a single record was left out of the collection.
///
/// These are data-quality problems, not operation failures.
#[derive(Debug, Error)]
pub enum RecordDefect {
    #[error("record is {found}, not an object")]
    NotAnObject { found: &'static str },

    #[error("record has no usable position")]
    MissingPosition,

    #[error("record fields do not decode: {0}")]
    InvalidFields(#[source] serde_json::Error),
}
