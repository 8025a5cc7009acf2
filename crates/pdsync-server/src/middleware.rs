use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";

/// Product payloads with many variants and images stay well under this.
const MAX_WEBHOOK_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Webhook signature settings used by [`verify_webhook_signature`].
///
/// With no secret configured, verification is skipped and every delivery is
/// accepted.
#[derive(Clone)]
pub struct WebhookAuth {
    secret: Option<Arc<str>>,
}

impl WebhookAuth {
    #[must_use]
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.map(Arc::from),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { secret: None }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.secret.is_some()
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware rejecting webhook deliveries whose `X-Shopify-Hmac-Sha256`
/// does not match the body, when a secret is configured.
///
/// The body is buffered to compute the HMAC and handed on unchanged.
pub async fn verify_webhook_signature(
    State(auth): State<WebhookAuth>,
    req: Request,
    next: Next,
) -> Response {
    let Some(secret) = auth.secret.as_deref() else {
        return next.run(req).await;
    };

    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_WEBHOOK_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "could not buffer webhook body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "payload too large").into_response();
        }
    };

    let provided = parts.headers.get(HMAC_HEADER).and_then(|v| v.to_str().ok());
    if !provided.is_some_and(|sig| signature_matches(secret, &bytes, sig)) {
        tracing::warn!(
            has_signature = provided.is_some(),
            "rejected webhook with invalid signature"
        );
        return (StatusCode::UNAUTHORIZED, "invalid webhook signature").into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Base64-encoded HMAC-SHA256 of `body` keyed with `secret`.
#[must_use]
pub fn compute_signature(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

fn signature_matches(secret: &str, body: &[u8], provided: &str) -> bool {
    compute_signature(secret, body)
        .is_some_and(|expected| expected.as_bytes().ct_eq(provided.trim().as_bytes()).into())
}
