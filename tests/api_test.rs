// tests/api_test.rs — Integration test: HTTP surface end to end

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tower::ServiceExt;

use fovea::api::types::SessionSummary;
use fovea::api::{build_router, ApiState, TurnResponse};
use fovea::core::engine::ConversationEngine;
use fovea::core::resolver::{NO_IMAGE_GUIDANCE, UPLOAD_PLACEHOLDER};
use fovea::core::session::Role;
use fovea::infra::errors::FoveaError;
use fovea::vision::{AnalysisRequest, VisionBackend};

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// A backend with one canned answer; the API tests exercise routing
/// and serialization, not analysis.
struct CannedBackend;

#[async_trait]
impl VisionBackend for CannedBackend {
    fn id(&self) -> &str {
        "canned"
    }

    async fn analyze(&self, _request: AnalysisRequest) -> Result<String, FoveaError> {
        Ok("a red bicycle".into())
    }
}

fn test_state(token: Option<&str>) -> ApiState {
    ApiState {
        engine: Arc::new(ConversationEngine::new(
            Arc::new(CannedBackend),
            "test-model",
            "You are a test persona.",
        )),
        token: token.map(String::from),
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_health_reports_version() {
    let app = build_router(test_state(None));
    let resp = app.oneshot(get("/api/v1/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_text_only_turn_gets_guidance() {
    let app = build_router(test_state(None));

    let resp = app
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"text": "what do you see?"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body.session_id, "s1");
    assert_eq!(body.turns.len(), 2);
    assert_eq!(body.turns[1].role, Role::Assistant);
    assert_eq!(body.turns[1].text, NO_IMAGE_GUIDANCE);
}

#[tokio::test]
async fn test_image_turn_round_trip() {
    let app = build_router(test_state(None));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"image": BASE64.encode(PNG)}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body.turns.len(), 2);
    assert_eq!(body.turns[0].text, UPLOAD_PLACEHOLDER);
    assert_eq!(body.turns[1].text, "a red bicycle");
    assert_eq!(body.turns[1].bound_image_seq, Some(0));

    // A follow-up question binds to the upload from the first request.
    let resp = app
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"text": "what color?"}),
        ))
        .await
        .unwrap();
    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body.turns.len(), 4);
    assert_eq!(body.turns[3].bound_image_seq, Some(0));
}

#[tokio::test]
async fn test_empty_submission_returns_unchanged_history() {
    let app = build_router(test_state(None));

    let resp = app
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body.turns.is_empty());
}

#[tokio::test]
async fn test_invalid_base64_is_bad_request() {
    let app = build_router(test_state(None));

    let resp = app
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"image": "not//valid=="}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_image_payload_is_bad_request() {
    let app = build_router(test_state(None));

    // "" decodes to zero bytes, which the codec rejects.
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"image": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The failed upload left nothing behind.
    let resp = app.oneshot(get("/api/v1/sessions/s1")).await.unwrap();
    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body.turns.is_empty());
}

#[tokio::test]
async fn test_history_and_clear_round_trip() {
    let app = build_router(test_state(None));

    app.clone()
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"image": BASE64.encode(PNG), "text": "hi"}),
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(get("/api/v1/sessions/s1"))
        .await
        .unwrap();
    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body.turns.len(), 2);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/v1/sessions/s1/clear",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/api/v1/sessions/s1")).await.unwrap();
    let body: TurnResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body.turns.is_empty());
}

#[tokio::test]
async fn test_destroy_session_then_404() {
    let app = build_router(test_state(None));

    app.clone()
        .oneshot(post_json(
            "/api/v1/sessions/gone/turns",
            serde_json::json!({"text": "hello"}),
        ))
        .await
        .unwrap();

    let delete = |uri: &str| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let resp = app
        .clone()
        .oneshot(delete("/api/v1/sessions/gone"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(delete("/api/v1/sessions/gone")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sessions_listing_counts() {
    let app = build_router(test_state(None));

    app.clone()
        .oneshot(post_json(
            "/api/v1/sessions/alpha/turns",
            serde_json::json!({"image": BASE64.encode(PNG)}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json(
            "/api/v1/sessions/beta/turns",
            serde_json::json!({"text": "hello"}),
        ))
        .await
        .unwrap();

    let resp = app.oneshot(get("/api/v1/sessions")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let listing: Vec<SessionSummary> = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].session_id, "alpha");
    assert_eq!(listing[0].turn_count, 2);
    assert_eq!(listing[0].image_count, 1);
    assert_eq!(listing[1].session_id, "beta");
    assert_eq!(listing[1].image_count, 0);
}

#[tokio::test]
async fn test_bearer_token_enforced() {
    let app = build_router(test_state(Some("s3cret")));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/v1/sessions/s1/turns",
            serde_json::json!({"text": "hi"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let mut req = post_json(
        "/api/v1/sessions/s1/turns",
        serde_json::json!({"text": "hi"}),
    );
    req.headers_mut().insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_static("Bearer s3cret"),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_open_even_with_token() {
    let app = build_router(test_state(Some("s3cret")));
    let resp = app.oneshot(get("/api/v1/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
