mod webhook;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use pdsync_core::ShopDomain;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, verify_webhook_signature, WebhookAuth};
use crate::pipeline::SyncPipeline;

pub use webhook::SHOP_DOMAIN_HEADER;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SyncPipeline>,
    /// Used when a delivery carries no shop domain header.
    pub default_shop: Option<ShopDomain>,
}

impl AppState {
    #[must_use]
    pub fn new(pipeline: SyncPipeline, default_shop: Option<ShopDomain>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            default_shop,
        }
    }
}

fn webhook_router(auth: WebhookAuth) -> Router<AppState> {
    Router::new()
        .route(
            "/webhook/product-updated",
            post(webhook::product_updated),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            auth,
            verify_webhook_signature,
        ))
}

pub fn build_app(state: AppState, auth: WebhookAuth) -> Router {
    let public_routes = Router::new().route("/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(webhook_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
