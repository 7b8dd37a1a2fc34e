// Shared helpers for driving a router in-process across integration tests.
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt;

static TRACING: Once = Once::new();

// Route translator logs to the test harness output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

// Send one request and decode the JSON body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

// Every error body carries exactly timestamp, message and details.
pub fn assert_error_shape(body: &Value) {
    let object = body.as_object().expect("json object");
    assert_eq!(object.len(), 3, "unexpected fields: {body}");

    let timestamp = body["timestamp"].as_str().expect("string timestamp");
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "timestamp does not parse: {timestamp}"
    );
    assert!(!body["details"].as_str().expect("string details").is_empty());
    assert!(body["message"].is_string());
}
