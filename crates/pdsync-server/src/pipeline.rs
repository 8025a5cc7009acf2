//! One product's lookup → read → decide → write sequence.
//!
//! Steps run strictly in order; the metafield read must reflect the state the
//! decision is made against. There is no locking across invocations: two
//! concurrent deliveries for the same product can both see "no metafield" and
//! both create one, or race on an update with the later write winning. The
//! platform's webhook redelivery is the only retry.

use pdsync_core::{
    decide, AppConfig, ProductUpdateEvent, ShopDomain, SkipReason, SyncDecision, SyncOutcome,
};
use pdsync_purpledot::{PurpleDotClient, PurpleDotError};
use pdsync_shopify::{ShopifyAdminClient, ShopifyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("preorder lookup failed: {0}")]
    Lookup(#[source] PurpleDotError),

    #[error("no shop domain to write the metafield to")]
    MissingShop,

    #[error("metafield read failed: {0}")]
    PlatformRead(#[source] ShopifyError),

    #[error("metafield write failed: {0}")]
    PlatformWrite(#[source] ShopifyError),
}

impl SyncError {
    /// Stable label for the step that failed, for log fields.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            SyncError::Lookup(_) => "preorder_lookup",
            SyncError::MissingShop => "shop_resolution",
            SyncError::PlatformRead(_) => "metafield_read",
            SyncError::PlatformWrite(_) => "metafield_write",
        }
    }
}

pub struct SyncPipeline {
    lookup: PurpleDotClient,
    store: ShopifyAdminClient,
}

impl SyncPipeline {
    #[must_use]
    pub fn new(lookup: PurpleDotClient, store: ShopifyAdminClient) -> Self {
        Self { lookup, store }
    }

    /// Builds both HTTP clients from application config.
    ///
    /// # Errors
    ///
    /// Fails if either client cannot be constructed or the preorder API URL
    /// does not parse.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let lookup = PurpleDotClient::new(
            &config.purple_dot_api_url,
            &config.purple_dot_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?;

        let store = match &config.shopify_admin_base_url {
            Some(base_url) => ShopifyAdminClient::with_base_url(
                &config.shopify_access_token,
                base_url,
                config.request_timeout_secs,
                &config.user_agent,
            )?,
            None => ShopifyAdminClient::new(
                &config.shopify_access_token,
                &config.shopify_api_version,
                config.request_timeout_secs,
                &config.user_agent,
            )?,
        };

        Ok(Self::new(lookup, store))
    }

    /// Synchronizes the delivery-date metafield for one product.
    ///
    /// Absent preorder data returns before the platform is contacted at all,
    /// so `shop` only has to be known once there is a date to write.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] tagged with the failing step. No step is retried.
    pub async fn run(
        &self,
        event: &ProductUpdateEvent,
        shop: Option<&ShopDomain>,
    ) -> Result<SyncOutcome, SyncError> {
        let product_id = event.id;

        let Some(key) = event.lookup_key() else {
            tracing::info!(product_id, "product has no handle or SKU; skipping");
            return Ok(SyncOutcome::Skipped(SkipReason::NoPreorderData));
        };

        let info = self.lookup.fetch(&key).await.map_err(SyncError::Lookup)?;
        if info.date().is_none() {
            tracing::info!(product_id, lookup = %key, "no preorder info found; skipping");
            return Ok(SyncOutcome::Skipped(SkipReason::NoPreorderData));
        }

        let shop = shop.ok_or(SyncError::MissingShop)?;

        let existing = self
            .store
            .fetch_existing(shop, product_id)
            .await
            .map_err(SyncError::PlatformRead)?;

        match decide(&info, existing.as_ref()) {
            SyncDecision::Skip(reason) => {
                tracing::info!(product_id, shop = %shop, %reason, "metafield unchanged");
                Ok(SyncOutcome::Skipped(reason))
            }
            SyncDecision::Create { value } => {
                let record = self
                    .store
                    .create(shop, product_id, &value)
                    .await
                    .map_err(SyncError::PlatformWrite)?;
                tracing::info!(
                    product_id,
                    shop = %shop,
                    metafield_id = %record.id,
                    delivery_date = %value,
                    "created delivery-date metafield"
                );
                Ok(SyncOutcome::Created(record))
            }
            SyncDecision::Update { id, value } => {
                let record = self
                    .store
                    .update(shop, id, &value)
                    .await
                    .map_err(SyncError::PlatformWrite)?;
                tracing::info!(
                    product_id,
                    shop = %shop,
                    metafield_id = %id,
                    previous = ?existing.and_then(|m| m.value),
                    delivery_date = %value,
                    "updated delivery-date metafield"
                );
                Ok(SyncOutcome::Updated(record))
            }
        }
    }
}
