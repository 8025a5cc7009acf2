//! Inbound `products/update` webhook payload and the identifiers derived from it.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::CoreError;

static SHOP_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)+$")
        .expect("shop domain pattern is valid")
});

/// Product payload delivered by the storefront's product-update webhook.
///
/// Only the fields the sync needs are modeled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductUpdateEvent {
    /// Numeric product ID (e.g., `788032119674292922`).
    pub id: i64,
    /// URL slug; the canonical preorder lookup key.
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<WebhookVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookVariant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Identifier used to query the preorder service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Handle(String),
    Sku(String),
}

impl LookupKey {
    /// Query parameter name understood by the preorder service.
    #[must_use]
    pub fn param(&self) -> &'static str {
        match self {
            LookupKey::Handle(_) => "handle",
            LookupKey::Sku(_) => "sku",
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            LookupKey::Handle(v) | LookupKey::Sku(v) => v,
        }
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.param(), self.value())
    }
}

impl ProductUpdateEvent {
    /// Picks the preorder lookup key for this product.
    ///
    /// The handle is preferred. When it is blank, the first non-blank variant
    /// SKU is used instead. Returns `None` when neither is available.
    #[must_use]
    pub fn lookup_key(&self) -> Option<LookupKey> {
        let handle = self.handle.trim();
        if !handle.is_empty() {
            return Some(LookupKey::Handle(handle.to_owned()));
        }

        self.variants
            .iter()
            .filter_map(|v| v.sku.as_deref())
            .map(str::trim)
            .find(|sku| !sku.is_empty())
            .map(|sku| LookupKey::Sku(sku.to_owned()))
    }
}

/// A validated shop hostname such as `example-store.myshopify.com`.
///
/// The value ends up in outbound Admin API URLs, so anything that is not a
/// bare lowercase hostname (scheme, path, port, whitespace) is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShopDomain`] if `raw` is not a bare hostname
    /// with at least one dot.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let lowered = raw.trim().to_ascii_lowercase();
        if lowered.len() > 253 || !SHOP_DOMAIN_RE.is_match(&lowered) {
            return Err(CoreError::InvalidShopDomain(raw.to_owned()));
        }
        Ok(Self(lowered))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(handle: &str, skus: &[Option<&str>]) -> ProductUpdateEvent {
        ProductUpdateEvent {
            id: 1,
            handle: handle.to_string(),
            title: "Tee".to_string(),
            variants: skus
                .iter()
                .map(|sku| WebhookVariant {
                    id: None,
                    sku: sku.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn deserializes_webhook_payload_ignoring_unknown_fields() {
        let payload = serde_json::json!({
            "id": 788_032_119_674_292_922_i64,
            "title": "Tee Shirt",
            "handle": "tee-shirt",
            "vendor": "Acme",
            "variants": [{ "id": 1, "sku": "TEE-S", "price": "10.00" }]
        });
        let parsed: ProductUpdateEvent = serde_json::from_value(payload).expect("parse");
        assert_eq!(parsed.id, 788_032_119_674_292_922);
        assert_eq!(parsed.handle, "tee-shirt");
        assert_eq!(parsed.variants[0].sku.as_deref(), Some("TEE-S"));
    }

    #[test]
    fn lookup_key_prefers_handle() {
        let key = event("tee-shirt", &[Some("TEE-S")]).lookup_key();
        assert_eq!(key, Some(LookupKey::Handle("tee-shirt".to_string())));
    }

    #[test]
    fn lookup_key_falls_back_to_first_non_blank_sku() {
        let key = event("  ", &[None, Some(""), Some("TEE-M")]).lookup_key();
        assert_eq!(key, Some(LookupKey::Sku("TEE-M".to_string())));
    }

    #[test]
    fn lookup_key_none_without_handle_or_sku() {
        assert_eq!(event("", &[None]).lookup_key(), None);
    }

    #[test]
    fn lookup_key_display_names_the_param() {
        assert_eq!(
            LookupKey::Sku("TEE-M".to_string()).to_string(),
            "sku=TEE-M"
        );
    }

    #[test]
    fn shop_domain_accepts_and_lowercases_hostnames() {
        let domain = ShopDomain::parse(" Example-Store.MyShopify.com ").expect("valid");
        assert_eq!(domain.as_str(), "example-store.myshopify.com");
    }

    #[test]
    fn shop_domain_rejects_non_hostnames() {
        for raw in [
            "",
            "localhost",
            "https://shop.example.com",
            "shop.example.com/admin",
            "shop.example.com:8443",
            "shop example.com",
            "-shop.example.com",
            "shop..example.com",
        ] {
            assert!(
                ShopDomain::parse(raw).is_err(),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
