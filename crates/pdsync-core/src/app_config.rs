use std::net::SocketAddr;

use crate::event::ShopDomain;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Static Admin API token sent as `X-Shopify-Access-Token`.
    pub shopify_access_token: String,
    /// Admin REST version segment, e.g. `2025-01`.
    pub shopify_api_version: String,
    /// Used when a webhook arrives without an `X-Shopify-Shop-Domain` header.
    pub shopify_shop_domain: Option<ShopDomain>,
    /// Fixed admin base URL. When set, the per-request shop domain is not used
    /// to build outbound URLs.
    pub shopify_admin_base_url: Option<String>,
    /// Enables `X-Shopify-Hmac-Sha256` verification on inbound webhooks.
    pub shopify_webhook_secret: Option<String>,
    pub purple_dot_api_url: String,
    pub purple_dot_api_key: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("shopify_access_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field("shopify_shop_domain", &self.shopify_shop_domain)
            .field("shopify_admin_base_url", &self.shopify_admin_base_url)
            .field(
                "shopify_webhook_secret",
                &self.shopify_webhook_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("purple_dot_api_url", &self.purple_dot_api_url)
            .field("purple_dot_api_key", &"[redacted]")
            .finish()
    }
}
