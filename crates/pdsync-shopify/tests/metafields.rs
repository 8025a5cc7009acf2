//! Integration tests for `ShopifyAdminClient` against a wiremock admin API.

use pdsync_core::{MetafieldId, ShopDomain};
use pdsync_shopify::{ShopifyAdminClient, ShopifyError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/admin/api/2025-01/products/42/metafields.json";

fn test_client(server: &MockServer) -> ShopifyAdminClient {
    ShopifyAdminClient::with_base_url(
        "shpat_test",
        &format!("{}/admin/api/2025-01", server.uri()),
        5,
        "pdsync-test/0.1",
    )
    .expect("client construction should not fail")
}

fn shop() -> ShopDomain {
    ShopDomain::parse("example-store.myshopify.com").expect("valid shop")
}

fn metafield_json(id: i64, namespace: &str, key: &str, value: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "namespace": namespace,
        "key": key,
        "value": value,
        "type": "single_line_text_field",
        "owner_id": 42,
        "owner_resource": "product"
    })
}

#[tokio::test]
async fn fetch_existing_filters_server_side_and_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("namespace", "custom"))
        .and(query_param("key", "expected_delivery_date"))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metafields": [metafield_json(900, "custom", "expected_delivery_date", Some("Jun 1"))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server)
        .fetch_existing(&shop(), 42)
        .await
        .expect("read should succeed")
        .expect("record should exist");

    assert_eq!(record.id, MetafieldId(900));
    assert_eq!(record.value.as_deref(), Some("Jun 1"));
}

#[tokio::test]
async fn fetch_existing_filters_unrelated_fields_client_side() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metafields": [
                metafield_json(1, "custom", "fabric", Some("cotton")),
                metafield_json(2, "global", "expected_delivery_date", Some("Jan 1")),
            ]
        })))
        .mount(&server)
        .await;

    let record = test_client(&server)
        .fetch_existing(&shop(), 42)
        .await
        .expect("read should succeed");

    assert!(record.is_none(), "unrelated metafields must not match");
}

#[tokio::test]
async fn fetch_existing_returns_first_of_duplicates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metafields": [
                metafield_json(10, "custom", "expected_delivery_date", Some("Jun 1")),
                metafield_json(11, "custom", "expected_delivery_date", Some("Jun 2")),
            ]
        })))
        .mount(&server)
        .await;

    let record = test_client(&server)
        .fetch_existing(&shop(), 42)
        .await
        .expect("read should succeed")
        .expect("record should exist");

    assert_eq!(record.id, MetafieldId(10));
}

#[tokio::test]
async fn fetch_existing_empty_list_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "metafields": [] })))
        .mount(&server)
        .await;

    let record = test_client(&server)
        .fetch_existing(&shop(), 42)
        .await
        .expect("read should succeed");

    assert!(record.is_none());
}

#[tokio::test]
async fn fetch_existing_non_2xx_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"errors": "[API] Invalid API key or access token"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_existing(&shop(), 42)
        .await
        .expect_err("401 should fail");

    match err {
        ShopifyError::UnexpectedStatus { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"), "body: {body}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn create_posts_full_metafield_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .and(body_json(json!({
            "metafield": {
                "namespace": "custom",
                "key": "expected_delivery_date",
                "type": "single_line_text_field",
                "value": "Jun 12"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "metafield": metafield_json(901, "custom", "expected_delivery_date", Some("Jun 12"))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server)
        .create(&shop(), 42, "Jun 12")
        .await
        .expect("create should succeed");

    assert_eq!(record.id, MetafieldId(901));
    assert_eq!(record.value.as_deref(), Some("Jun 12"));
}

#[tokio::test]
async fn update_puts_value_to_metafield_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/admin/api/2025-01/metafields/900.json"))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .and(body_json(json!({ "metafield": { "id": 900, "value": "Jun 12" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metafield": metafield_json(900, "custom", "expected_delivery_date", Some("Jun 12"))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server)
        .update(&shop(), MetafieldId(900), "Jun 12")
        .await
        .expect("update should succeed");

    assert_eq!(record.id, MetafieldId(900));
    assert_eq!(record.value.as_deref(), Some("Jun 12"));
}

#[tokio::test]
async fn write_rejection_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"errors": {"value": ["can't be blank"]}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .create(&shop(), 42, "Jun 12")
        .await
        .expect_err("422 should fail");

    assert!(
        matches!(err, ShopifyError::UnexpectedStatus { status: 422, .. }),
        "expected UnexpectedStatus(422), got: {err:?}"
    );
}
