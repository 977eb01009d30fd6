//! Router tests for `/auth/register` and `/auth/login`.

mod support;

use axum::http::StatusCode;
use tower::ServiceExt;

use domain::IdentifierKind;
use support::{app, body_json, post_json, Call, FakeIdentityClient, FakeIncidentClient};

const REGISTER_BODY: &str =
    r#"{"username":"alice","email":"alice@example.com","phone_number":"+40712345678","password":"pw"}"#;

#[tokio::test]
async fn test_login_with_email_identifier() {
    let identity = FakeIdentityClient::default().with_account("alice", "a@b.com", "x");
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/login", r#"{"identifier":"a@b.com","password":"x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "session_id": "session-login-1-1" }));
    assert_eq!(
        identity.calls(),
        vec![Call::Login(IdentifierKind::Email, "a@b.com".into(), "x".into())]
    );
}

#[tokio::test]
async fn test_login_with_username_identifier() {
    let identity = FakeIdentityClient::default().with_account("alice", "a@b.com", "x");
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/login", r#"{"identifier":"alice","password":"x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["session_id"].is_string());
    assert!(body.get("id").is_none());
    assert_eq!(
        identity.calls(),
        vec![Call::Login(IdentifierKind::Username, "alice".into(), "x".into())]
    );
}

#[tokio::test]
async fn test_login_with_bad_password_is_unauthorized() {
    let identity = FakeIdentityClient::default().with_account("alice", "a@b.com", "x");
    let router = app(identity, FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/login", r#"{"identifier":"alice","password":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "error": "invalid credentials" }));
}

#[tokio::test]
async fn test_login_with_malformed_body_is_bad_request() {
    let identity = FakeIdentityClient::default();
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/login", r#"{"identifier":"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert!(identity.calls().is_empty());
}

#[tokio::test]
async fn test_register_creates_login_and_session() {
    let identity = FakeIdentityClient::default();
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/register", REGISTER_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], "login-1");
    assert_eq!(body["session_id"], "session-login-1-1");
    assert_eq!(
        identity.calls(),
        vec![
            Call::CreateLogin("alice@example.com".into()),
            Call::Login(IdentifierKind::Email, "alice@example.com".into(), "pw".into()),
        ]
    );
}

#[tokio::test]
async fn test_register_duplicate_email_never_logs_in() {
    let identity = FakeIdentityClient::default().with_account("someone", "alice@example.com", "old");
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/register", REGISTER_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "error": "email already registered" }));
    assert_eq!(identity.calls(), vec![Call::CreateLogin("alice@example.com".into())]);
}

#[tokio::test]
async fn test_register_with_malformed_body_makes_no_rpc() {
    let identity = FakeIdentityClient::default();
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json("/auth/register", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert!(identity.calls().is_empty());
}

#[tokio::test]
async fn test_register_with_empty_username_makes_no_rpc() {
    let identity = FakeIdentityClient::default();
    let router = app(identity.clone(), FakeIncidentClient::default());

    let response = router
        .oneshot(post_json(
            "/auth/register",
            r#"{"username":"","email":"alice@example.com","password":"pw"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "username is required" })
    );
    assert!(identity.calls().is_empty());
}

#[tokio::test]
async fn test_register_then_login_yields_same_identity() {
    let identity = FakeIdentityClient::default();
    let router = app(identity.clone(), FakeIncidentClient::default());

    let registered = body_json(
        router
            .clone()
            .oneshot(post_json("/auth/register", REGISTER_BODY))
            .await
            .unwrap(),
    )
    .await;
    let logged_in = body_json(
        router
            .oneshot(post_json(
                "/auth/login",
                r#"{"identifier":"alice@example.com","password":"pw"}"#,
            ))
            .await
            .unwrap(),
    )
    .await;

    let id = registered["id"].as_str().unwrap();
    let prefix = format!("session-{}-", id);
    assert!(registered["session_id"].as_str().unwrap().starts_with(&prefix));
    assert!(logged_in["session_id"].as_str().unwrap().starts_with(&prefix));
}

#[tokio::test]
async fn test_health_is_public() {
    let router = app(FakeIdentityClient::default(), FakeIncidentClient::default());

    let response = router
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}
