use thiserror::Error;

/// Errors returned by the Admin API metafield client. None are retried here.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid admin API URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
