use thiserror::Error;

/// Errors returned by the preorder service client.
///
/// A lookup that succeeds but finds no delivery date is not an error; it
/// yields an empty [`pdsync_core::PreorderInfo`].
#[derive(Debug, Error)]
pub enum PurpleDotError {
    /// The underlying HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network, TLS, or body-read failure during a lookup. `url` has the API
    /// key masked and `source` carries no URL.
    #[error("preorder lookup request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid preorder API URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("lookup identifier is empty")]
    InvalidIdentifier,
}
