#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use board_api::{AppState, AppStateInner, router};
use board_db::Database;

/// Router over a fresh in-memory database, plus the state for direct checks.
pub fn test_app() -> (Router, AppState) {
    let db = Database::open_in_memory().expect("open in-memory database");
    let state = AppStateInner::new(db);
    (router(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response is JSON")
    };
    (status, value)
}

pub async fn create_user(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "username": username, "password": "mypassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create user failed: {body}");
    body["user"]["_id"].as_str().expect("user id").to_string()
}

pub async fn create_message(app: &Router, title: &str, author: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/messages",
        Some(json!({ "title": title, "body": "a test message body", "author": author })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create message failed: {body}");
    body["message"]["_id"].as_str().expect("message id").to_string()
}
