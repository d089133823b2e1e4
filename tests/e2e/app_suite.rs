//! End-to-end journey: two users sharing one feed

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::*;
use crate::{assert_failure, assert_success};

#[tokio::test]
async fn test_post_lifecycle_between_two_users() {
    let app = spawn_app().await;

    // Alice signs up, then logs in with a wrong and a right password.
    let alice = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    assert_failure!(
        app.server
            .post("/api/auth/login")
            .json(&json!({ "email": "alice@x.com", "password": "wrong1" }))
            .await,
        StatusCode::BAD_REQUEST,
        "Invalid email or password."
    );

    let login = assert_success!(
        app.server
            .post("/api/auth/login")
            .json(&json!({ "email": "alice@x.com", "password": "secret1" }))
            .await,
        StatusCode::OK
    );
    let alice_token = login["token"].as_str().expect("token").to_string();
    assert_eq!(login["user"]["_id"], alice.id.as_str());

    // Alice publishes a post.
    let created = assert_success!(
        app.server
            .post("/api/posts")
            .authorization_bearer(&alice_token)
            .multipart(post_form("Hello", "My first post"))
            .await,
        StatusCode::CREATED
    );
    let post_id = created["post"]["_id"].as_str().expect("post id").to_string();

    // Bob reacts to it but cannot remove it.
    let bob = register_user(&app.server, "Bob", "bob@x.com", "secret2").await;

    assert_success!(
        app.server
            .put(&format!("/api/posts/{post_id}/like"))
            .authorization_bearer(&bob.token)
            .await,
        StatusCode::OK
    );
    assert_success!(
        app.server
            .post(&format!("/api/posts/{post_id}/comments"))
            .authorization_bearer(&bob.token)
            .json(&json!({ "text": "Welcome!" }))
            .await,
        StatusCode::CREATED
    );
    assert_failure!(
        app.server
            .delete(&format!("/api/posts/{post_id}"))
            .authorization_bearer(&bob.token)
            .await,
        StatusCode::UNAUTHORIZED,
        "You can only delete your own posts."
    );

    let feed: Vec<Value> = app.server.get("/api/posts").await.json();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["likeCount"], 1);
    assert_eq!(feed[0]["comments"][0]["user"]["name"], "Bob");

    // Alice removes it and the feed is empty again.
    assert_success!(
        app.server
            .delete(&format!("/api/posts/{post_id}"))
            .authorization_bearer(&alice_token)
            .await,
        StatusCode::OK
    );

    let feed: Vec<Value> = app.server.get("/api/posts").await.json();
    assert!(feed.is_empty());
    assert_eq!(app.stored_uploads(), 0);
}

#[tokio::test]
async fn test_profile_journey() {
    let app = spawn_app().await;
    let carol = register_unique_user(&app.server, "Carol").await;

    let me = assert_success!(
        app.server.get("/api/auth/me").authorization_bearer(&carol.token).await,
        StatusCode::OK
    );
    assert_eq!(me["user"]["bio"], "");

    assert_success!(
        app.server
            .put("/api/users/profile")
            .authorization_bearer(&carol.token)
            .json(&json!({ "bio": "Hiring Rust engineers" }))
            .await,
        StatusCode::OK
    );

    let profile = assert_success!(
        app.server.get(&format!("/api/users/{}", carol.id)).await,
        StatusCode::OK
    );
    assert_eq!(profile["user"]["bio"], "Hiring Rust engineers");
    assert_eq!(profile["user"]["name"], carol.name.as_str());
}
