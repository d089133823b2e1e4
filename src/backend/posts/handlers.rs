//! Post HTTP Handlers
//!
//! Reads are public. Creating, editing, deleting, liking and commenting go
//! through the auth gate; editing and deleting also go through the
//! ownership guard.
//!
//! Handlers on paths behind `auth_middleware` read the user from
//! `Extension<AuthenticatedUser>`. Handlers on paths shared with public reads
//! take `AuthUser`, which runs the gate itself.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use super::models::Post;
use super::types::{CommentRequest, LikeResponse, MessageResponse, PostEnvelope, UpdatePostRequest};
use super::uploads::{read_post_form, remove_image, save_image, MISSING_IMAGE_MESSAGE};
use crate::backend::auth::ownership::{assert_owner, OwnerAction};
use crate::backend::error::BackendError;
use crate::backend::extract::parse_id;
use crate::backend::middleware::auth::{AuthUser, AuthenticatedUser};
use crate::backend::server::state::AppState;
use crate::shared::validation::{validate_comment, validate_new_post, validate_post_update};

pub const POST_NOT_FOUND_MESSAGE: &str = "Post not found.";

fn not_found() -> BackendError {
    BackendError::not_found(POST_NOT_FOUND_MESSAGE)
}

async fn load_post(pool: &SqlitePool, post_id: Uuid) -> Result<Post, BackendError> {
    db::get_post(pool, post_id).await?.ok_or_else(not_found)
}

/// List all posts, newest first
pub async fn list_posts(State(pool): State<SqlitePool>) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(db::list_posts(&pool).await?))
}

/// Get a single post
pub async fn get_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Post>, BackendError> {
    let post_id = parse_id(&id)?;
    Ok(Json(load_post(&pool, post_id).await?))
}

/// Create a post from a multipart form with `title`, `content` and `image`
///
/// The image is written before the row is inserted and removed again if the
/// insert fails.
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<PostEnvelope>), BackendError> {
    let form = read_post_form(multipart?, state.config.max_upload_bytes).await?;

    validate_new_post(&form.title, &form.content)?;
    let image = form
        .image
        .ok_or_else(|| BackendError::bad_request(MISSING_IMAGE_MESSAGE))?;

    let upload_dir = &state.config.upload_dir;
    let image_path = save_image(upload_dir, &image).await?;

    let created = db::create_post(
        &state.db_pool,
        current.user_id,
        form.title.trim(),
        form.content.trim(),
        &image_path,
    )
    .await;

    let post_id = match created {
        Ok(id) => id,
        Err(e) => {
            remove_image(upload_dir, &image_path).await;
            return Err(e.into());
        }
    };

    let post = load_post(&state.db_pool, post_id).await?;
    tracing::info!(post_id = %post.id, author = %current.user_id, "Post created");

    Ok((
        StatusCode::CREATED,
        Json(PostEnvelope::new("Post created successfully!", post)),
    ))
}

/// Edit a post's title and/or content (author only)
pub async fn update_post(
    State(pool): State<SqlitePool>,
    AuthUser(current): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let post_id = parse_id(&id)?;
    let Json(request) = payload?;

    let title = request.title.as_deref().map(str::trim);
    let content = request.content.as_deref().map(str::trim);
    validate_post_update(title, content)?;

    let post = load_post(&pool, post_id).await?;
    assert_owner(&post, current.user_id, OwnerAction::Edit)?;

    if !db::update_post(&pool, post_id, title, content).await? {
        return Err(not_found());
    }

    let post = load_post(&pool, post_id).await?;
    tracing::info!(%post_id, "Post updated");

    Ok(Json(PostEnvelope::new("Post updated successfully!", post)))
}

/// Delete a post and its image (author only)
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let post_id = parse_id(&id)?;

    let post = load_post(&state.db_pool, post_id).await?;
    assert_owner(&post, current.user_id, OwnerAction::Delete)?;

    if !db::delete_post(&state.db_pool, post_id).await? {
        return Err(not_found());
    }
    remove_image(&state.config.upload_dir, &post.image).await;

    tracing::info!(%post_id, "Post deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Post deleted successfully!",
    }))
}

/// Like the post, or unlike it if the caller already does
pub async fn toggle_like(
    State(pool): State<SqlitePool>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, BackendError> {
    let post_id = parse_id(&id)?;

    let outcome = db::toggle_like(&pool, post_id, current.user_id)
        .await?
        .ok_or_else(not_found)?;
    let post = load_post(&pool, post_id).await?;

    tracing::debug!(%post_id, liked = outcome.liked, count = outcome.like_count, "Like toggled");

    Ok(Json(LikeResponse {
        success: true,
        message: if outcome.liked { "Post liked!" } else { "Post unliked!" },
        liked: outcome.liked,
        like_count: outcome.like_count,
        post,
    }))
}

/// Add a comment to a post
pub async fn add_comment(
    State(pool): State<SqlitePool>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostEnvelope>), BackendError> {
    let post_id = parse_id(&id)?;
    let Json(request) = payload?;

    let text = request.text.trim();
    validate_comment(text)?;

    db::add_comment(&pool, post_id, current.user_id, text)
        .await
        .map_err(|e| {
            let missing_post = e
                .as_database_error()
                .map(|db| db.is_foreign_key_violation())
                .unwrap_or(false);
            if missing_post {
                not_found()
            } else {
                BackendError::from(e)
            }
        })?;

    let post = load_post(&pool, post_id).await?;
    tracing::info!(%post_id, user = %current.user_id, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(PostEnvelope::new("Comment added successfully!", post)),
    ))
}
