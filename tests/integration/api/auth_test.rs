//! Authentication API integration tests

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::common::*;
use crate::{assert_failure, assert_success};

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let body = assert_success!(app.server.get("/api/test").await, StatusCode::OK);
    assert_eq!(body["message"], "Backend is working!");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_register_success() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Alice", "email": "Alice@X.com", "password": "secret1" }))
        .await;

    let body = assert_success!(response, StatusCode::CREATED);
    assert_eq!(body["message"], "Account created successfully!");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["email"], "alice@x.com");
    assert_eq!(body["user"]["bio"], "");
    assert!(body["user"].get("password").is_none());
    assert!(!body.to_string().contains("$2"));
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    let app = spawn_app().await;
    register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Alice Two", "email": "ALICE@x.com", "password": "secret2" }))
        .await;

    assert_failure!(
        response,
        StatusCode::BAD_REQUEST,
        "An account with this email already exists."
    );
    assert_eq!(count_rows(app.pool(), "users").await, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "A", "email": "not-an-email", "password": "123" }))
        .await;

    let body = assert_failure!(
        response,
        StatusCode::BAD_REQUEST,
        "Please check your input and try again."
    );
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
    assert_eq!(count_rows(app.pool(), "users").await, 0);
}

#[tokio::test]
async fn test_register_rejects_non_json_body() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_success() {
    let app = spawn_app().await;
    let user = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "  ALICE@x.com ", "password": "secret1" }))
        .await;

    let body = assert_success!(response, StatusCode::OK);
    assert_eq!(body["message"], "Login successful!");
    assert_eq!(body["user"]["_id"], user.id.as_str());
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@x.com", "password": "wrong1" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@x.com", "password": "secret1" }))
        .await;

    let a = assert_failure!(wrong_password, StatusCode::BAD_REQUEST, "Invalid email or password.");
    let b = assert_failure!(unknown_email, StatusCode::BAD_REQUEST, "Invalid email or password.");
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = spawn_app().await;

    assert_failure!(
        app.server.get("/api/auth/me").await,
        StatusCode::UNAUTHORIZED,
        "No token provided. Please login."
    );
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let app = spawn_app().await;
    let user = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    let response = app
        .server
        .get("/api/auth/me")
        .authorization_bearer(&user.token)
        .await;

    let body = assert_success!(response, StatusCode::OK);
    assert_eq!(body["user"]["_id"], user.id.as_str());
    assert_eq!(body["user"]["email"], "alice@x.com");
}

#[tokio::test]
async fn test_me_with_tampered_token() {
    let app = spawn_app().await;
    let user = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    let sig_start = user.token.rfind('.').expect("signed token") + 1;
    let first = &user.token[sig_start..sig_start + 1];
    let replacement = if first == "A" { "B" } else { "A" };
    let tampered = format!(
        "{}{}{}",
        &user.token[..sig_start],
        replacement,
        &user.token[sig_start + 1..]
    );

    assert_failure!(
        app.server.get("/api/auth/me").authorization_bearer(&tampered).await,
        StatusCode::UNAUTHORIZED,
        "Invalid token. Please login again."
    );
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = spawn_app().await;
    let user = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;
    let id = user.id.parse().expect("uuid");

    let expired = app
        .state
        .tokens
        .issue_at(id, Utc::now() - Duration::days(7) - Duration::seconds(1))
        .expect("token");

    assert_failure!(
        app.server.get("/api/auth/me").authorization_bearer(&expired).await,
        StatusCode::UNAUTHORIZED,
        "Token expired. Please login again."
    );
}

#[tokio::test]
async fn test_me_with_token_for_deleted_user() {
    let app = spawn_app().await;
    let user = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user.id)
        .execute(app.pool())
        .await
        .expect("delete user");

    assert_failure!(
        app.server.get("/api/auth/me").authorization_bearer(&user.token).await,
        StatusCode::UNAUTHORIZED,
        "User not found. Please login again."
    );
}

#[tokio::test]
async fn test_unknown_api_path() {
    let app = spawn_app().await;

    assert_failure!(
        app.server.get("/api/does/not/exist").await,
        StatusCode::NOT_FOUND,
        "The requested resource was not found."
    );
}

#[tokio::test]
async fn test_wrong_method_on_known_path() {
    let app = spawn_app().await;

    assert_failure!(
        app.server.delete("/api/posts").await,
        StatusCode::NOT_FOUND,
        "The requested resource was not found."
    );
    assert_failure!(
        app.server.post("/api/test").await,
        StatusCode::NOT_FOUND,
        "The requested resource was not found."
    );
    assert_failure!(
        app.server.get("/api/auth/register").await,
        StatusCode::NOT_FOUND,
        "The requested resource was not found."
    );
}
