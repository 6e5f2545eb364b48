// crates/backend-lib/tests/auth_flow.rs
//! End-to-end exercise of the HTTP contract over in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tower::ServiceExt;

use filedock_backend_lib::config::Settings;
use filedock_backend_lib::router::create_router;
use filedock_backend_lib::store::{
    CredentialStore, MemoryCredentialBackend, MemoryTokenBackend, TokenStore,
};
use filedock_backend_lib::AppState;

fn test_app() -> Router {
    let timeout = Duration::from_secs(1);
    let credentials = CredentialStore::new(Arc::new(MemoryCredentialBackend::new()), timeout);
    let tokens = TokenStore::new(Arc::new(MemoryTokenBackend::new()), timeout);
    let state = Arc::new(AppState::new(credentials, tokens, Settings::default()));
    create_router(state)
}

fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

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

async fn register(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn connect(app: &Router, authorization: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/connect")
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn whoami(app: &Router, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/users/me")
        .header("X-Token", token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn full_session_lifecycle() {
    let app = test_app();

    // Register
    let (status, body) = register(
        &app,
        json!({"email": "a@x.com", "password": "pw1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "a@x.com");
    let user_id = body["id"].as_str().unwrap().to_string();
    assert!(!user_id.is_empty());

    // Register again with the same email
    let (status, body) = register(
        &app,
        json!({"email": "a@x.com", "password": "other"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Already exist");

    // Login
    let (status, body) = connect(&app, &basic_auth("a@x.com", "pw1")).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // Whoami
    let (status, body) = whoami(&app, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["email"], "a@x.com");
    // id and email only; no digest ever leaves the service
    assert_eq!(body.as_object().unwrap().len(), 2);

    // Logout: 204 with no body
    let request = Request::builder()
        .uri("/disconnect")
        .header("X-Token", &token)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // The token no longer resolves
    let (status, body) = whoami(&app, &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn registration_reports_the_missing_field() {
    let app = test_app();

    let (status, body) = register(&app, json!({"password": "pw1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing email");

    let (status, body) = register(&app, json!({"email": "a@x.com"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing password");

    // Email is checked first when both are absent
    let (status, body) = register(&app, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing email");
}

#[tokio::test]
async fn bad_credentials_all_collapse_to_unauthorized() {
    let app = test_app();
    let (status, _) = register(&app, json!({"email": "a@x.com", "password": "pw1"})).await;
    assert_eq!(status, StatusCode::CREATED);

    // Wrong password and unknown email are indistinguishable
    for authorization in [
        basic_auth("a@x.com", "wrongpass"),
        basic_auth("ghost@x.com", "pw1"),
    ] {
        let (status, body) = connect(&app, &authorization).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    // Malformed headers land in the same place
    for authorization in [
        "Bearer abc".to_string(),
        "Basic !!!not-base64!!!".to_string(),
        format!("Basic {}", STANDARD.encode("no-colon-here")),
        format!("Basic {}", STANDARD.encode("a@x.com:pw1:extra")),
    ] {
        let (status, body) = connect(&app, &authorization).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    // Absent header entirely
    let request = Request::builder()
        .uri("/connect")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_endpoints_require_the_token_header() {
    let app = test_app();

    for uri in ["/users/me", "/disconnect"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn disconnect_of_a_never_issued_token_is_idempotent() {
    let app = test_app();

    // Deleting a non-existent key is not an error
    let request = Request::builder()
        .uri("/disconnect")
        .header("X-Token", "never-issued")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn whoami_rejects_a_never_issued_token() {
    let app = test_app();
    let (status, body) = whoami(&app, "never-issued").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn status_and_stats_reflect_the_stores() {
    let app = test_app();

    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redis"], true);
    assert_eq!(body["db"], true);

    register(&app, json!({"email": "a@x.com", "password": "pw1"})).await;
    register(&app, json!({"email": "b@x.com", "password": "pw2"})).await;

    let request = Request::builder().uri("/stats").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], 2);
    assert_eq!(body["files"], 0);
}
