//! The one metafield this system owns on each product.

use serde::{Deserialize, Serialize};

pub const METAFIELD_NAMESPACE: &str = "custom";
pub const METAFIELD_KEY: &str = "expected_delivery_date";
/// Admin API type for plain single-line text values.
pub const METAFIELD_TYPE: &str = "single_line_text_field";

/// Platform-assigned metafield identifier. Opaque to this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetafieldId(pub i64);

impl std::fmt::Display for MetafieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A metafield as read from (or returned by a write to) the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetafieldRecord {
    pub id: MetafieldId,
    pub namespace: String,
    pub key: String,
    /// `null` is possible for definitions with no value set yet.
    #[serde(default)]
    pub value: Option<String>,
}

impl MetafieldRecord {
    /// `true` when this record is the `custom.expected_delivery_date` field.
    #[must_use]
    pub fn is_delivery_date(&self) -> bool {
        self.namespace == METAFIELD_NAMESPACE && self.key == METAFIELD_KEY
    }
}
