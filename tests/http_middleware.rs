//! Echo server tests driven through the router without a socket.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use trace_propagation::config::TracerConfig;
use trace_propagation::http::EchoServer;

fn server(reject_corrupted: bool) -> EchoServer {
    let mut config = TracerConfig::default();
    config.propagation.baggage_prefix = "bg-".into();
    config.propagation.trace_id_header = "tid".into();
    config.propagation.parent_id_header = "pid".into();
    config.server.reject_corrupted = reject_corrupted;
    EchoServer::new(config)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_continues_inbound_trace() {
    let request = Request::builder()
        .uri("/orders/42")
        .header("TID", "123456789")
        .header("pid", "987654321")
        .header("bg-item", "x")
        .body(Body::empty())
        .unwrap();

    let response = server(false).router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let span_id = response.headers().get("pid").unwrap().to_str().unwrap().to_string();
    assert_eq!(response.headers().get("tid").unwrap(), "123456789");
    assert_eq!(response.headers().get("bg-item").unwrap(), "x");

    let body = body_json(response).await;
    assert_eq!(body["span"], "http.request");
    assert_eq!(body["parent_id"], 987654321u64);
    assert_eq!(body["context"]["trace_id"], 123456789u64);
    assert_eq!(body["context"]["span_id"].to_string(), span_id);
    assert_eq!(body["context"]["baggage"]["item"], "x");
}

#[test]
fn test_server_keeps_its_config() {
    let server = server(true);
    assert_eq!(server.config().propagation.trace_id_header, "tid");
    assert!(server.config().server.reject_corrupted);
}

#[tokio::test]
async fn test_untraced_request_starts_new_trace() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = server(true).router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["parent_id"], 0);
    assert_eq!(body["context"]["trace_id"], body["context"]["span_id"]);
    assert_ne!(body["context"]["trace_id"], 0);
}

#[tokio::test]
async fn test_corrupt_context_starts_new_trace_by_default() {
    let request = Request::builder()
        .uri("/")
        .header("tid", "not-a-number")
        .header("pid", "2")
        .body(Body::empty())
        .unwrap();

    let response = server(false).router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["parent_id"], 0);
}

#[tokio::test]
async fn test_corrupt_context_rejected_when_configured() {
    let request = Request::builder()
        .uri("/")
        .header("tid", "1")
        .header("pid", "A")
        .body(Body::empty())
        .unwrap();

    let response = server(true).router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
