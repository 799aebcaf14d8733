//! HTTP API integration tests
//!
//! Drives the router with `tower::ServiceExt::oneshot` over the in-memory
//! store: signup, signin and `/users/me`.

#![cfg(feature = "ssr")]

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{auth_header, test_auth, test_router};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_me(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri("/users/me");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn signup(app: &Router, email: &str, name: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/signup",
            json!({ "email": email, "password": "pw123456", "name": name }),
            None,
        ),
    )
    .await
}

async fn signin(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/signin",
            json!({ "email": email, "password": password }),
            None,
        ),
    )
    .await
}

async fn token_for(app: &Router, email: &str, name: &str) -> String {
    signup(app, email, name).await;
    let (_, body) = signin(app, email, "pw123456").await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_returns_user_without_password() {
    let auth = test_auth();
    let app = test_router(&auth);

    let (status, body) = signup(&app, "a@x.com", "Ann").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["name"], "Ann");
    assert!(body["id"].as_str().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let auth = test_auth();
    let app = test_router(&auth);

    signup(&app, "a@x.com", "Ann").await;
    let (status, body) = signup(&app, "a@x.com", "Ann Again").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists");
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn test_signup_rejects_malformed_fields() {
    let auth = test_auth();
    let app = test_router(&auth);

    let cases = [
        json!({ "email": "not-an-email", "password": "pw123456", "name": "Ann" }),
        json!({ "email": "a@x.com", "password": "pw123456", "name": "A" }),
        json!({ "email": "a@x.com", "password": "x".repeat(36), "name": "Ann" }),
        json!({ "email": "a@x.com", "name": "Ann" }),
    ];

    for case in cases {
        let (status, body) = send(&app, json_request(Method::POST, "/signup", case.clone(), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", case);
        assert_eq!(body["error"], "Incorrect data");
    }
    assert!(auth.store.is_empty().await);
}

#[tokio::test]
async fn test_unreadable_body_is_bad_request() {
    let auth = test_auth();
    let app = test_router(&auth);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/signin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin_returns_token() {
    let auth = test_auth();
    let app = test_router(&auth);
    signup(&app, "a@x.com", "Ann").await;

    let (status, body) = signin(&app, "a@x.com", "pw123456").await;

    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().unwrap();
    assert!(auth.service.authenticate(token).is_ok());
}

#[tokio::test]
async fn test_signin_failures_share_one_body() {
    let auth = test_auth();
    let app = test_router(&auth);
    signup(&app, "a@x.com", "Ann").await;

    let (wrong_status, wrong_body) = signin(&app, "a@x.com", "not-it").await;
    let (unknown_status, unknown_body) = signin(&app, "nobody@x.com", "pw123456").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "Wrong email or password");
}

#[tokio::test]
async fn test_get_me_with_valid_token() {
    let auth = test_auth();
    let app = test_router(&auth);
    let token = token_for(&app, "a@x.com", "Ann").await;

    let (status, body) = send(&app, get_me(Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["name"], "Ann");
}

#[tokio::test]
async fn test_get_me_requires_authorization() {
    let auth = test_auth();
    let app = test_router(&auth);

    let (missing_status, missing_body) = send(&app, get_me(None)).await;
    let (invalid_status, invalid_body) = send(&app, get_me(Some("garbage"))).await;

    let basic = Request::builder()
        .uri("/users/me")
        .header(header::AUTHORIZATION, "Basic YTpi")
        .body(Body::empty())
        .unwrap();
    let (basic_status, _) = send(&app, basic).await;

    assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    assert_eq!(invalid_status, StatusCode::UNAUTHORIZED);
    assert_eq!(basic_status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_body, invalid_body);
    assert_eq!(missing_body["error"], "Authorization required");
}

#[tokio::test]
async fn test_get_me_after_expiry_is_unauthorized() {
    let auth = test_auth();
    let app = test_router(&auth);
    let token = token_for(&app, "a@x.com", "Ann").await;

    auth.clock.advance(chrono::Duration::days(8));
    let (status, _) = send(&app, get_me(Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_me_for_unknown_subject_is_not_found() {
    let auth = test_auth();
    let app = test_router(&auth);
    let token = auth
        .service
        .tokens()
        .issue(&uuid::Uuid::new_v4().to_string())
        .unwrap();

    let (status, body) = send(&app, get_me(Some(&token))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_patch_me_updates_profile() {
    let auth = test_auth();
    let app = test_router(&auth);
    let token = token_for(&app, "a@x.com", "Ann").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            "/users/me",
            json!({ "email": "ann@x.com", "name": "Annie" }),
            Some(&token),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["name"], "Annie");

    let (_, me) = send(&app, get_me(Some(&token))).await;
    assert_eq!(me, body);
}

#[tokio::test]
async fn test_patch_me_to_taken_email_conflicts() {
    let auth = test_auth();
    let app = test_router(&auth);
    let token = token_for(&app, "a@x.com", "Ann").await;
    signup(&app, "b@x.com", "Bob").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            "/users/me",
            json!({ "email": "b@x.com", "name": "Ann" }),
            Some(&token),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn test_patch_me_without_token_never_reaches_handler() {
    let auth = test_auth();
    let app = test_router(&auth);

    let (status, _) = send(
        &app,
        json_request(Method::PATCH, "/users/me", json!({ "email": "a@x.com", "name": "Ann" }), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let auth = test_auth();
    let app = test_router(&auth);

    let request = Request::builder().uri("/nowhere").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}
