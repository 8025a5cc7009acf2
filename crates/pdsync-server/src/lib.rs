//! Product-update webhook service that syncs preorder delivery dates onto a
//! product metafield.

pub mod api;
pub mod middleware;
pub mod pipeline;

pub use api::{build_app, AppState, SHOP_DOMAIN_HEADER};
pub use middleware::WebhookAuth;
pub use pipeline::{SyncError, SyncPipeline};
