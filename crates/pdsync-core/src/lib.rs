//! Domain types, configuration, and the pure sync decision shared by every
//! pdsync crate.

mod app_config;
mod config;
pub mod decision;
pub mod event;
pub mod metafield;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use decision::{decide, PreorderInfo, SkipReason, SyncDecision, SyncOutcome};
pub use event::{LookupKey, ProductUpdateEvent, ShopDomain, WebhookVariant};
pub use metafield::{
    MetafieldId, MetafieldRecord, METAFIELD_KEY, METAFIELD_NAMESPACE, METAFIELD_TYPE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid shop domain \"{0}\"")]
    InvalidShopDomain(String),
}
