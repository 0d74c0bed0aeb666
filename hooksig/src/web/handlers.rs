//! Webhook endpoint handlers.
//!
//! Every inbound webhook is authenticated against the raw body bytes before
//! anything else looks at it. Rejections get a bare 401: the reason is logged
//! server-side and never returned to the caller.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::signature::{validate_request, WebhookSecret};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub secret: Arc<WebhookSecret>,
    pub max_age_ms: i64,
}

impl AppState {
    pub fn new(secret: WebhookSecret, max_age_ms: i64) -> Self {
        Self {
            secret: Arc::new(secret),
            max_age_ms,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Content Status Webhook
// =============================================================================

/// Status change pushed by the automation caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStatusUpdate {
    pub content_id: String,
    pub status: String,
}

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl WebhookResponse {
    fn reply(code: StatusCode, status: &'static str) -> (StatusCode, Json<Self>) {
        (
            code,
            Json(Self {
                status,
                content_id: None,
            }),
        )
    }
}

/// Content status webhook endpoint.
///
/// This endpoint:
/// 1. Verifies the signature and timestamp headers against the raw body
/// 2. Parses the body as a [`ContentStatusUpdate`]
/// 3. Returns 200 OK with the accepted content id
pub async fn content_status_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    info!(body_length = body.len(), "content_status_webhook_received");

    if let Err(reason) = validate_request(&headers, &body, state.secret.expose(), state.max_age_ms)
    {
        warn!(
            reason = %reason,
            kind = reason.kind(),
            "webhook_signature_rejected"
        );
        return WebhookResponse::reply(StatusCode::UNAUTHORIZED, "unauthorized");
    }

    let update: ContentStatusUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "content_status_payload_invalid");
            return WebhookResponse::reply(StatusCode::BAD_REQUEST, "invalid_payload");
        }
    };

    info!(
        content_id = %update.content_id,
        status = %update.status,
        "content_status_accepted"
    );

    (
        StatusCode::OK,
        Json(WebhookResponse {
            status: "accepted",
            content_id: Some(update.content_id),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{HeaderValue, Request},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::signature::{build_headers, build_headers_at, now_ms, DEFAULT_MAX_AGE_MS};
    use crate::web::router;

    use super::*;

    const SECRET: &str = "test-secret";
    const BODY: &str = r#"{"content_id":"abc","status":"draft"}"#;

    fn app() -> Router {
        router(AppState::new(WebhookSecret::new(SECRET), DEFAULT_MAX_AGE_MS), 1024)
    }

    fn signed_request(body: &str, signed_body: &str, secret: &str, timestamp: i64) -> Request<Body> {
        let signed = build_headers_at(signed_body.as_bytes(), secret.as_bytes(), timestamp);
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhooks/content-status");
        for (name, value) in signed.to_pairs() {
            builder = builder.header(name, HeaderValue::from_str(&value).unwrap());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_signed_request_is_accepted() {
        let (status, body) = send(signed_request(BODY, BODY, SECRET, now_ms())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "accepted", "content_id": "abc"}));
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthorized() {
        let (status, body) = send(signed_request(BODY, BODY, "wrong-secret", now_ms())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"status": "unauthorized"}));
    }

    #[tokio::test]
    async fn test_stale_request_is_unauthorized() {
        let stale = now_ms() - DEFAULT_MAX_AGE_MS - 10_000;
        let (status, body) = send(signed_request(BODY, BODY, SECRET, stale)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        // Same body as every other rejection.
        assert_eq!(body, json!({"status": "unauthorized"}));
    }

    #[tokio::test]
    async fn test_tampered_body_is_unauthorized() {
        let tampered = r#"{"content_id":"abc","status":"published"}"#;
        let (status, _) = send(signed_request(tampered, BODY, SECRET, now_ms())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_headers_is_unauthorized() {
        let request = Request::builder()
            .method("POST")
            .uri("/webhooks/content-status")
            .body(Body::from(BODY))
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authentic_but_unparseable_body() {
        let body = r#"{"unexpected":true}"#;
        let signed = build_headers(body.as_bytes(), SECRET.as_bytes());
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhooks/content-status");
        for (name, value) in signed.to_pairs() {
            builder = builder.header(name, value);
        }
        let (status, response) = send(builder.body(Body::from(body)).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"status": "invalid_payload"}));
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let body = format!(r#"{{"content_id":"{}","status":"draft"}}"#, "x".repeat(2048));
        let request = signed_request(&body, &body, SECRET, now_ms());
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
