mod common;

use std::time::Duration;

use axum::{
    Router,
    http::{Method, StatusCode},
    routing::get,
};
use serde_json::json;

use board_api::with_request_timeout;
use common::{send, test_app};

fn slow_app(timeout: Duration) -> Router {
    let router = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            "done"
        }),
    );
    with_request_timeout(router, timeout)
}

#[tokio::test]
async fn expired_request_gets_json_error() {
    let app = slow_app(Duration::from_millis(50));

    let (status, body) = send(&app, Method::GET, "/slow", None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"]["code"], "request_timeout");
    assert_eq!(body["error"]["message"], "request did not complete in time");
}

#[tokio::test]
async fn fast_requests_pass_through_the_timeout() {
    let (app, _) = test_app();
    let app = with_request_timeout(app, Duration::from_secs(5));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
