mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::{create_message, create_user, send, test_app};

#[tokio::test]
async fn registered_user_is_listed_without_password() {
    let (app, _) = test_app();
    let user_id = create_user(&app, "myuser").await;

    let (status, body) = send(&app, Method::GET, &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "myuser");
    assert_eq!(body["user"]["messages"], json!([]));
    assert!(body["user"].get("password").is_none());

    let (_, body) = send(&app, Method::GET, "/users", None).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["_id"], user_id.as_str());
}

#[tokio::test]
async fn listing_carries_each_users_messages() {
    let (app, _) = test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bobby").await;
    let m1 = create_message(&app, "m1", &alice).await;
    let m2 = create_message(&app, "m2", &bob).await;

    let (_, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(body["users"][0]["messages"], json!([m1]));
    assert_eq!(body["users"][1]["messages"], json!([m2]));
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let (app, _) = test_app();
    create_user(&app, "myuser").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "username": "myuser", "password": "otherpassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "username_taken");
}

#[tokio::test]
async fn weak_credentials_are_rejected() {
    let (app, _) = test_app();

    for payload in [
        json!({ "username": "ab", "password": "mypassword" }),
        json!({ "username": "myuser", "password": "short" }),
        // 7 characters, 9 bytes
        json!({ "username": "myuser", "password": "pässwör" }),
        json!({ "username": "myuser" }),
    ] {
        let (status, body) = send(&app, Method::POST, "/users", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_body");
    }

    let (_, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn unknown_user_reads_as_null() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user": null }));

    let (status, body) = send(&app, Method::GET, "/users/12345", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "malformed_id");
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
