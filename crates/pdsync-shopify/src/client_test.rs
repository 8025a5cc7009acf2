use super::*;

fn shop() -> ShopDomain {
    ShopDomain::parse("example-store.myshopify.com").expect("valid shop")
}

#[test]
fn per_shop_url_uses_shop_host_and_api_version() {
    let client = ShopifyAdminClient::new("shpat_test", "2025-01", 5, "pdsync-test/0.1").unwrap();
    let url = client
        .url(&shop(), "products/42/metafields.json")
        .expect("valid url");
    assert_eq!(
        url.as_str(),
        "https://example-store.myshopify.com/admin/api/2025-01/products/42/metafields.json"
    );
}

#[test]
fn fixed_base_url_ignores_shop_and_strips_trailing_slash() {
    let client = ShopifyAdminClient::with_base_url(
        "shpat_test",
        "http://127.0.0.1:9000/admin/api/2025-01/",
        5,
        "pdsync-test/0.1",
    )
    .unwrap();
    let url = client.url(&shop(), "metafields/7.json").expect("valid url");
    assert_eq!(
        url.as_str(),
        "http://127.0.0.1:9000/admin/api/2025-01/metafields/7.json"
    );
}

#[test]
fn fixed_base_url_that_does_not_parse_is_invalid_url() {
    let client =
        ShopifyAdminClient::with_base_url("shpat_test", "not a url", 5, "pdsync-test/0.1").unwrap();
    let err = client.url(&shop(), "metafields/7.json").unwrap_err();
    assert!(
        matches!(err, ShopifyError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn truncate_leaves_short_bodies_alone() {
    assert_eq!(truncate("{\"errors\":\"Not Found\"}"), "{\"errors\":\"Not Found\"}");
}

#[test]
fn truncate_caps_long_bodies() {
    let long = "x".repeat(MAX_ERROR_BODY_CHARS + 100);
    let cut = truncate(&long);
    assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
    assert!(cut.ends_with('…'));
}

#[test]
fn create_body_serializes_type_field() {
    let body = MetafieldEnvelope {
        metafield: NewMetafield {
            namespace: METAFIELD_NAMESPACE,
            key: METAFIELD_KEY,
            value_type: METAFIELD_TYPE,
            value: "Jun 12",
        },
    };
    let json = serde_json::to_value(&body).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "metafield": {
                "namespace": "custom",
                "key": "expected_delivery_date",
                "type": "single_line_text_field",
                "value": "Jun 12"
            }
        })
    );
}
