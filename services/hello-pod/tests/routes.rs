use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hello_pod::PodIdentity;

fn identity() -> PodIdentity {
    PodIdentity::new("worker-3", "demo", Some("10.0.0.7".to_string()), 8080)
}

async fn send(router: Router, uri: &str) -> (StatusCode, Value) {
    send_with(router, Method::GET, uri).await
}

async fn send_with(router: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("unable to build request");

    let response = router.oneshot(request).await.unwrap(/* Infallible */);
    let status = response.status();

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/json", "uri {}", uri);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("unable to read response body");
    let body = serde_json::from_slice(&bytes).expect("response body is not JSON");

    (status, body)
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    send(hello_pod::app(identity()), uri).await
}

fn assert_timestamp(body: &Value) {
    let ts = body["timestamp"].as_str().expect("timestamp missing");
    chrono::DateTime::parse_from_rfc3339(ts).expect("timestamp is not RFC 3339");
}

#[tokio::test]
async fn hello_reports_identity() {
    let (status, body) = get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello, World!");
    assert_eq!(body["pod_name"], "worker-3");
    assert_eq!(body["pod_namespace"], "demo");
    assert_eq!(body["pod_ip"], "10.0.0.7");
    assert_eq!(body["version"], "1.0");
    assert_timestamp(&body);
}

#[tokio::test]
async fn probes_always_pass() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["pod_name"], "worker-3");
    assert_timestamp(&body);

    let (status, body) = get_json("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["pod_name"], "worker-3");
    assert_timestamp(&body);
}

#[tokio::test]
async fn compute_burns_for_requested_duration() {
    let (status, body) = get_json("/compute?duration=0.1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Computation completed");
    assert_eq!(body["pod_name"], "worker-3");
    assert_eq!(body["duration_requested"], 0.1);
    assert!(body["duration_actual"].as_f64().unwrap() >= 0.1);
    assert!(body["duration_actual"].as_f64().unwrap() < 2.0);
    assert!(body["result"].as_u64().is_some());
    assert_timestamp(&body);
}

#[tokio::test]
async fn compute_with_zero_or_negative_duration_is_instant() {
    for uri in ["/compute?duration=0", "/compute?duration=-3"] {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 0);
        assert_eq!(body["duration_actual"], 0.0);
    }
}

#[tokio::test]
async fn compute_rejects_non_numeric_duration() {
    let (status, body) = get_json("/compute?duration=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["pod_name"], "worker-3");
    assert!(body["error"].as_str().unwrap().contains("duration"));
}

#[tokio::test]
async fn snapshots_report_identity() {
    let (status, body) = get_json("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pod_name"], "worker-3");
    assert_eq!(body["pod_namespace"], "demo");
    assert_eq!(body["pod_ip"], "10.0.0.7");
    assert_timestamp(&body);

    let (status, body) = get_json("/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pod_name"], "worker-3");
    assert!(body["rust_version"].as_str().unwrap().starts_with("rustc"));
    assert_eq!(body["service_version"], env!("CARGO_PKG_VERSION"));
    assert_timestamp(&body);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = get_json("/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["pod_name"], "worker-3");
}

#[tokio::test]
#[allow(dependency_on_unit_never_type_fallback)]
async fn panicking_handler_is_json_500() {
    let identity = identity();
    let router = Router::new().route(
        "/boom",
        get(|| async {
            panic!("boom");
        }),
    );
    let router = hello_pod::with_layers(router, &identity);

    let (status, body) = send(router, "/boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["pod_name"], "worker-3");
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    for (method, uri) in [(Method::POST, "/"), (Method::DELETE, "/health")] {
        let (status, body) = send_with(hello_pod::app(identity()), method, uri).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "uri {}", uri);
        assert_eq!(body["status"], 405);
        assert_eq!(body["error"], "Method not allowed");
        assert_eq!(body["pod_name"], "worker-3");
    }
}
