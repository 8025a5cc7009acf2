//! Admin REST request and response bodies for product metafields.

use pdsync_core::{MetafieldId, MetafieldRecord};
use serde::{Deserialize, Serialize};

/// Response from `GET /products/{id}/metafields.json`.
#[derive(Debug, Deserialize)]
pub struct MetafieldsResponse {
    #[serde(default)]
    pub metafields: Vec<MetafieldRecord>,
}

/// Response from metafield create and update calls.
#[derive(Debug, Deserialize)]
pub struct MetafieldResponse {
    pub metafield: MetafieldRecord,
}

/// `{"metafield": ...}` request wrapper.
#[derive(Debug, Serialize)]
pub struct MetafieldEnvelope<T: Serialize> {
    pub metafield: T,
}

#[derive(Debug, Serialize)]
pub struct NewMetafield<'a> {
    pub namespace: &'a str,
    pub key: &'a str,
    #[serde(rename = "type")]
    pub value_type: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MetafieldValueUpdate<'a> {
    pub id: MetafieldId,
    pub value: &'a str,
}
