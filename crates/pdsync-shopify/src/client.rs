//! HTTP client for the Shopify Admin REST metafield endpoints.

use std::time::Duration;

use pdsync_core::{
    MetafieldId, MetafieldRecord, ShopDomain, METAFIELD_KEY, METAFIELD_NAMESPACE, METAFIELD_TYPE,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::ShopifyError;
use crate::types::{
    MetafieldEnvelope, MetafieldResponse, MetafieldValueUpdate, MetafieldsResponse, NewMetafield,
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Error bodies longer than this are truncated before being put into errors.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Where Admin API requests are sent.
#[derive(Debug, Clone)]
pub enum AdminEndpoint {
    /// `https://{shop}/admin/api/{api_version}`, shop taken per request.
    PerShop { api_version: String },
    /// A fixed admin base URL; the per-request shop is ignored.
    Fixed(String),
}

/// Reads and writes the `custom.expected_delivery_date` product metafield.
///
/// Every non-2xx response is returned as [`ShopifyError::UnexpectedStatus`].
/// Nothing is retried; the webhook sender's redelivery is the retry mechanism.
pub struct ShopifyAdminClient {
    client: Client,
    access_token: String,
    endpoint: AdminEndpoint,
}

impl ShopifyAdminClient {
    /// Creates a client that targets each shop's own admin host.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        Self::with_endpoint(
            access_token,
            AdminEndpoint::PerShop {
                api_version: api_version.to_owned(),
            },
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client pinned to a fixed admin base URL (single-store
    /// deployments, or a mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        access_token: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        Self::with_endpoint(
            access_token,
            AdminEndpoint::Fixed(base_url.trim().trim_end_matches('/').to_owned()),
            timeout_secs,
            user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_endpoint(
        access_token: &str,
        endpoint: AdminEndpoint,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            endpoint,
        })
    }

    /// Reads the product's delivery-date metafield, if one exists.
    ///
    /// The list call is filtered server-side by namespace and key; results
    /// are filtered again locally in case the filter is ignored. If several
    /// records match, the first is returned and the anomaly is logged.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_existing(
        &self,
        shop: &ShopDomain,
        product_id: i64,
    ) -> Result<Option<MetafieldRecord>, ShopifyError> {
        let mut url = self.url(shop, &format!("products/{product_id}/metafields.json"))?;
        url.query_pairs_mut()
            .append_pair("namespace", METAFIELD_NAMESPACE)
            .append_pair("key", METAFIELD_KEY);

        let request = self.client.get(url.clone());
        let response: MetafieldsResponse = self
            .send_json(request, &url, &format!("list metafields (product {product_id})"))
            .await?;

        let mut matching = response
            .metafields
            .into_iter()
            .filter(MetafieldRecord::is_delivery_date);

        let first = matching.next();
        let extra: Vec<MetafieldId> = matching.map(|m| m.id).collect();
        if let Some(canonical) = &first {
            if !extra.is_empty() {
                tracing::warn!(
                    product_id,
                    shop = %shop,
                    canonical_id = %canonical.id,
                    duplicate_ids = ?extra,
                    "multiple delivery-date metafields found; using the first"
                );
            }
        }

        Ok(first)
    }

    /// Creates the delivery-date metafield on a product.
    ///
    /// Only valid when [`Self::fetch_existing`] returned `None`.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::Deserialize`] if the body does not match the expected shape.
    pub async fn create(
        &self,
        shop: &ShopDomain,
        product_id: i64,
        value: &str,
    ) -> Result<MetafieldRecord, ShopifyError> {
        let url = self.url(shop, &format!("products/{product_id}/metafields.json"))?;
        let body = MetafieldEnvelope {
            metafield: NewMetafield {
                namespace: METAFIELD_NAMESPACE,
                key: METAFIELD_KEY,
                value_type: METAFIELD_TYPE,
                value,
            },
        };

        let request = self.client.post(url.clone()).json(&body);
        let response: MetafieldResponse = self
            .send_json(request, &url, &format!("create metafield (product {product_id})"))
            .await?;
        Ok(response.metafield)
    }

    /// Overwrites the value of an existing metafield in place.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::Deserialize`] if the body does not match the expected shape.
    pub async fn update(
        &self,
        shop: &ShopDomain,
        metafield_id: MetafieldId,
        value: &str,
    ) -> Result<MetafieldRecord, ShopifyError> {
        let url = self.url(shop, &format!("metafields/{metafield_id}.json"))?;
        let body = MetafieldEnvelope {
            metafield: MetafieldValueUpdate {
                id: metafield_id,
                value,
            },
        };

        let request = self.client.put(url.clone()).json(&body);
        let response: MetafieldResponse = self
            .send_json(request, &url, &format!("update metafield {metafield_id}"))
            .await?;
        Ok(response.metafield)
    }

    /// Admin API base for `shop`, without a trailing slash.
    fn admin_base(&self, shop: &ShopDomain) -> String {
        match &self.endpoint {
            AdminEndpoint::PerShop { api_version } => {
                format!("https://{shop}/admin/api/{api_version}")
            }
            AdminEndpoint::Fixed(base) => base.clone(),
        }
    }

    /// Joins `path` onto the admin base.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidUrl`] if the result does not parse.
    fn url(&self, shop: &ShopDomain, path: &str) -> Result<Url, ShopifyError> {
        let raw = format!("{}/{path}", self.admin_base(shop));
        Url::parse(&raw).map_err(|e| ShopifyError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// Adds auth headers, sends, checks for 2xx, and parses the JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, ShopifyError> {
        let response = request
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ShopifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_owned();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
