use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use pdsync_core::{ProductUpdateEvent, ShopDomain, SkipReason, SyncOutcome};

use super::AppState;
use crate::middleware::RequestId;

pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";

const FAILURE_MESSAGE: &str = "Error updating metafield";

pub(super) async fn product_updated(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(event): Json<ProductUpdateEvent>,
) -> (StatusCode, &'static str) {
    let product_id = event.id;

    let shop = resolve_shop(&headers, state.default_shop.as_ref());

    match state.pipeline.run(&event, shop.as_ref()).await {
        Ok(outcome) => (StatusCode::OK, outcome_message(&outcome)),
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                product_id,
                handle = %event.handle,
                shop = ?shop.as_ref().map(ShopDomain::as_str),
                stage = e.stage(),
                error = %e,
                "metafield sync failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_MESSAGE)
        }
    }
}

/// Header value wins over the configured default. An unparsable header is
/// treated as missing rather than silently replaced by the default.
fn resolve_shop(headers: &HeaderMap, default_shop: Option<&ShopDomain>) -> Option<ShopDomain> {
    match headers.get(SHOP_DOMAIN_HEADER) {
        Some(value) => {
            let raw = value.to_str().ok()?;
            match ShopDomain::parse(raw) {
                Ok(shop) => Some(shop),
                Err(e) => {
                    tracing::warn!(error = %e, "rejected shop domain header");
                    None
                }
            }
        }
        None => default_shop.cloned(),
    }
}

fn outcome_message(outcome: &SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Skipped(SkipReason::NoPreorderData) => "No preorder data found",
        SyncOutcome::Skipped(SkipReason::AlreadyUpToDate) => {
            "Metafield already up to date, no update needed."
        }
        SyncOutcome::Created(_) => "Metafield created successfully",
        SyncOutcome::Updated(_) => "Metafield updated successfully",
    }
}
