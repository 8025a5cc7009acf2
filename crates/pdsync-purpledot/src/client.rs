//! HTTP client for the Purple Dot preorder/waitlist lookup endpoint.

use std::time::Duration;

use pdsync_core::{LookupKey, PreorderInfo};
use reqwest::{Client, Url};

use crate::error::PurpleDotError;
use crate::extract::extract_delivery_date;

/// Client for the preorder service's product lookup.
///
/// Read-only: one `GET` per lookup, filtered by handle or SKU. Non-2xx
/// responses and transport failures are errors; a successful response with no
/// usable date is an empty [`PreorderInfo`].
pub struct PurpleDotClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PurpleDotClient {
    /// Creates a client for the lookup endpoint at `api_url`.
    ///
    /// `api_url` is the full endpoint (e.g.
    /// `https://www.purpledotprice.com/api/v1/products`); `api_key` and the
    /// identifier are appended as query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PurpleDotError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PurpleDotError::InvalidBaseUrl`] if
    /// `api_url` does not parse.
    pub fn new(
        api_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PurpleDotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(api_url.trim()).map_err(|e| PurpleDotError::InvalidBaseUrl {
            url: api_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Looks up preorder data for one product.
    ///
    /// # Errors
    ///
    /// - [`PurpleDotError::InvalidIdentifier`] if the key's value is blank (no request is sent).
    /// - [`PurpleDotError::UnexpectedStatus`] on any non-2xx status.
    /// - [`PurpleDotError::Transport`] on network or TLS failure.
    /// - [`PurpleDotError::Deserialize`] if the body is not JSON.
    pub async fn fetch(&self, key: &LookupKey) -> Result<PreorderInfo, PurpleDotError> {
        if key.value().trim().is_empty() {
            return Err(PurpleDotError::InvalidIdentifier);
        }

        let url = self.build_url(key);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let status = response.status();

        if !status.is_success() {
            return Err(PurpleDotError::UnexpectedStatus {
                status: status.as_u16(),
                url: redacted(&url),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let parsed: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| PurpleDotError::Deserialize {
                context: format!("preorder lookup ({key})"),
                source: e,
            })?;

        match extract_delivery_date(&parsed) {
            Some(found) => {
                tracing::debug!(
                    lookup = %key,
                    path = found.path,
                    field = found.field,
                    delivery_date = %found.value,
                    "resolved preorder delivery date"
                );
                Ok(PreorderInfo::new(found.value))
            }
            None => Ok(PreorderInfo::absent()),
        }
    }

    /// Appends `api_key` and the lookup identifier to the endpoint URL.
    fn build_url(&self, key: &LookupKey) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair(key.param(), key.value());
        url
    }
}

/// reqwest errors embed the full request URL, query string included.
fn transport_error(url: &Url, source: reqwest::Error) -> PurpleDotError {
    PurpleDotError::Transport {
        url: redacted(url),
        source: source.without_url(),
    }
}

/// Renders `url` with the `api_key` query value masked, for errors and logs.
fn redacted(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api_key" {
                "[redacted]".to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut masked = url.clone();
    masked.set_query(None);
    if !pairs.is_empty() {
        masked.query_pairs_mut().extend_pairs(pairs);
    }
    masked.to_string()
}
