//! Post API integration tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};

use crate::common::*;
use crate::{assert_failure, assert_success};

#[tokio::test]
async fn test_create_post() {
    let app = spawn_app().await;
    let alice = register_user(&app.server, "Alice", "alice@x.com", "secret1").await;

    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .multipart(post_form("  Hello  ", "First post"))
        .await;

    let body = assert_success!(response, StatusCode::CREATED);
    assert_eq!(body["message"], "Post created successfully!");

    let post = &body["post"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["content"], "First post");
    assert_eq!(post["author"]["_id"], alice.id.as_str());
    assert_eq!(post["author"]["name"], "Alice");
    assert_eq!(post["likeCount"], 0);
    assert_eq!(post["commentCount"], 0);
    assert!(post["image"].as_str().is_some_and(|p| p.starts_with("/uploads/") && p.ends_with(".png")));
    assert_eq!(app.stored_uploads(), 1);
}

#[tokio::test]
async fn test_uploaded_image_is_served() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let post = create_post(&app.server, &alice, "Picture").await;

    let image = post["image"].as_str().expect("image path");
    let response = app.server.get(image).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().as_ref(), b"\x89PNG\r\n\x1a\nfake");
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/posts")
        .multipart(post_form("Hello", "World"))
        .await;

    assert_failure!(response, StatusCode::UNAUTHORIZED, "No token provided. Please login.");
    assert_eq!(count_rows(app.pool(), "posts").await, 0);
    assert_eq!(app.stored_uploads(), 0);
}

#[tokio::test]
async fn test_create_post_without_image() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;

    let form = MultipartForm::new()
        .add_text("title", "Hello")
        .add_text("content", "World");
    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;

    assert_failure!(response, StatusCode::BAD_REQUEST, "Please select an image for your post.");
    assert_eq!(count_rows(app.pool(), "posts").await, 0);
}

#[tokio::test]
async fn test_create_post_rejects_non_image() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;

    let form = MultipartForm::new()
        .add_text("title", "Hello")
        .add_text("content", "World")
        .add_part(
            "image",
            Part::bytes(b"%PDF-1.4".to_vec())
                .file_name("doc.pdf")
                .mime_type("application/pdf"),
        );
    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;

    assert_failure!(response, StatusCode::BAD_REQUEST, "Only image files are allowed.");
    assert_eq!(app.stored_uploads(), 0);
}

#[tokio::test]
async fn test_create_post_rejects_oversized_image() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;

    let form = MultipartForm::new()
        .add_text("title", "Hello")
        .add_text("content", "World")
        .add_part("image", image_part(vec![0u8; TEST_MAX_UPLOAD_BYTES + 1]));
    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;

    let body = assert_failure!(
        response,
        StatusCode::BAD_REQUEST,
        "File size too large. Please select a smaller image (max 1MB)."
    );
    assert!(body.get("errors").is_none());
    assert_eq!(count_rows(app.pool(), "posts").await, 0);
    assert_eq!(app.stored_uploads(), 0);
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;

    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .multipart(post_form("   ", &"x".repeat(1001)))
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
    assert_eq!(fields, vec!["title", "content"]);
    assert_eq!(app.stored_uploads(), 0);
}

#[tokio::test]
async fn test_list_posts_newest_first() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;

    create_post(&app.server, &alice, "First").await;
    create_post(&app.server, &alice, "Second").await;
    create_post(&app.server, &alice, "Third").await;

    let response = app.server.get("/api/posts").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let posts: Vec<Value> = response.json();
    let titles: Vec<&str> = posts.iter().filter_map(|p| p["title"].as_str()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_get_post() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");

    let response = app.server.get(&format!("/api/posts/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let fetched: Value = response.json();
    assert_eq!(fetched["_id"], id);
    assert_eq!(fetched["title"], "Hello");
}

#[tokio::test]
async fn test_get_post_not_found_and_malformed_id() {
    let app = spawn_app().await;

    assert_failure!(
        app.server.get(&format!("/api/posts/{}", uuid::Uuid::new_v4())).await,
        StatusCode::NOT_FOUND,
        "Post not found."
    );
    assert_failure!(
        app.server.get("/api/posts/not-an-id").await,
        StatusCode::BAD_REQUEST,
        "Invalid data format. Please try again."
    );
}

#[tokio::test]
async fn test_update_post_by_author() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");

    let response = app
        .server
        .put(&format!("/api/posts/{id}"))
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Edited" }))
        .await;

    let body = assert_success!(response, StatusCode::OK);
    assert_eq!(body["message"], "Post updated successfully!");
    assert_eq!(body["post"]["title"], "Edited");
    assert_eq!(body["post"]["content"], "Some content");
}

#[tokio::test]
async fn test_update_post_rejects_blank_fields() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");

    let response = app
        .server
        .put(&format!("/api/posts/{id}"))
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "   " }))
        .await;

    assert_failure!(
        response,
        StatusCode::BAD_REQUEST,
        "Please check your input and try again."
    );
}

#[tokio::test]
async fn test_update_post_by_other_user() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let bob = register_unique_user(&app.server, "Bob").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");

    let response = app
        .server
        .put(&format!("/api/posts/{id}"))
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Hijacked" }))
        .await;

    assert_failure!(
        response,
        StatusCode::UNAUTHORIZED,
        "You can only edit your own posts."
    );

    let fetched: Value = app.server.get(&format!("/api/posts/{id}")).await.json();
    assert_eq!(fetched["title"], "Hello");
}

#[tokio::test]
async fn test_delete_post_removes_image_and_relations() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let bob = register_unique_user(&app.server, "Bob").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");

    app.server
        .put(&format!("/api/posts/{id}/like"))
        .authorization_bearer(&bob.token)
        .await
        .assert_status_ok();
    app.server
        .post(&format!("/api/posts/{id}/comments"))
        .authorization_bearer(&bob.token)
        .json(&json!({ "text": "Nice" }))
        .await
        .assert_status(StatusCode::CREATED);

    let forbidden = app
        .server
        .delete(&format!("/api/posts/{id}"))
        .authorization_bearer(&bob.token)
        .await;
    assert_failure!(forbidden, StatusCode::UNAUTHORIZED, "You can only delete your own posts.");
    assert_eq!(app.stored_uploads(), 1);

    let response = app
        .server
        .delete(&format!("/api/posts/{id}"))
        .authorization_bearer(&alice.token)
        .await;
    let body = assert_success!(response, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully!");

    assert_eq!(count_rows(app.pool(), "posts").await, 0);
    assert_eq!(count_rows(app.pool(), "post_likes").await, 0);
    assert_eq!(count_rows(app.pool(), "post_comments").await, 0);
    assert_eq!(app.stored_uploads(), 0);

    assert_failure!(
        app.server.get(&format!("/api/posts/{id}")).await,
        StatusCode::NOT_FOUND,
        "Post not found."
    );
}

#[tokio::test]
async fn test_like_toggle() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let bob = register_unique_user(&app.server, "Bob").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");
    let path = format!("/api/posts/{id}/like");

    let liked = assert_success!(
        app.server.put(&path).authorization_bearer(&bob.token).await,
        StatusCode::OK
    );
    assert_eq!(liked["message"], "Post liked!");
    assert_eq!(liked["liked"], true);
    assert_eq!(liked["likeCount"], 1);
    assert_eq!(liked["post"]["likes"], json!([bob.id]));

    let also_liked = assert_success!(
        app.server.put(&path).authorization_bearer(&alice.token).await,
        StatusCode::OK
    );
    assert_eq!(also_liked["likeCount"], 2);

    let unliked = assert_success!(
        app.server.put(&path).authorization_bearer(&bob.token).await,
        StatusCode::OK
    );
    assert_eq!(unliked["message"], "Post unliked!");
    assert_eq!(unliked["liked"], false);
    assert_eq!(unliked["likeCount"], 1);
    assert_eq!(unliked["post"]["likes"], json!([alice.id]));
}

#[tokio::test]
async fn test_like_requires_token_and_existing_post() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let missing = format!("/api/posts/{}/like", uuid::Uuid::new_v4());

    assert_failure!(
        app.server.put(&missing).await,
        StatusCode::UNAUTHORIZED,
        "No token provided. Please login."
    );
    assert_failure!(
        app.server.put(&missing).authorization_bearer(&alice.token).await,
        StatusCode::NOT_FOUND,
        "Post not found."
    );
}

#[tokio::test]
async fn test_add_comment() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let bob = register_unique_user(&app.server, "Bob").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");
    let path = format!("/api/posts/{id}/comments");

    app.server
        .post(&path)
        .authorization_bearer(&bob.token)
        .json(&json!({ "text": "  First!  " }))
        .await
        .assert_status(StatusCode::CREATED);
    let response = app
        .server
        .post(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "text": "Thanks" }))
        .await;

    let body = assert_success!(response, StatusCode::CREATED);
    assert_eq!(body["message"], "Comment added successfully!");
    let comments = body["post"]["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "First!");
    assert_eq!(comments[0]["user"]["_id"], bob.id.as_str());
    assert_eq!(comments[0]["user"]["name"], "Bob");
    assert_eq!(comments[1]["text"], "Thanks");
    assert_eq!(body["post"]["commentCount"], 2);
}

#[tokio::test]
async fn test_add_comment_validation_and_missing_post() {
    let app = spawn_app().await;
    let alice = register_unique_user(&app.server, "Alice").await;
    let post = create_post(&app.server, &alice, "Hello").await;
    let id = post["_id"].as_str().expect("post id");

    assert_failure!(
        app.server
            .post(&format!("/api/posts/{id}/comments"))
            .authorization_bearer(&alice.token)
            .json(&json!({ "text": "x".repeat(501) }))
            .await,
        StatusCode::BAD_REQUEST,
        "Please check your input and try again."
    );
    assert_failure!(
        app.server
            .post(&format!("/api/posts/{}/comments", uuid::Uuid::new_v4()))
            .authorization_bearer(&alice.token)
            .json(&json!({ "text": "Hello?" }))
            .await,
        StatusCode::NOT_FOUND,
        "Post not found."
    );
    assert_eq!(count_rows(app.pool(), "post_comments").await, 0);
}
