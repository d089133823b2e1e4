//! Profile HTTP Handlers
//!
//! Public profile reads and the signed-in user's own profile update.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserEnvelope;
use crate::backend::auth::users::{get_user_by_id, update_profile as store_profile};
use crate::backend::error::BackendError;
use crate::backend::extract::parse_id;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::backend::posts::{db as posts_db, Post};
use crate::shared::validation::validate_profile_update;

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";

/// Profile update; only name and bio are editable
///
/// Other fields (email, password) are accepted and ignored.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// Public profile of any user
pub async fn get_profile(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<UserEnvelope>, BackendError> {
    let user_id = parse_id(&id)?;
    let user = get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND_MESSAGE))?;

    Ok(Json(UserEnvelope::new(user)))
}

/// Posts by one user, newest first
///
/// An unknown user simply has no posts.
pub async fn get_user_posts(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Post>>, BackendError> {
    let user_id = parse_id(&id)?;
    Ok(Json(posts_db::list_posts_by_author(&pool, user_id).await?))
}

/// Update the signed-in user's name and/or bio
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserEnvelope>, BackendError> {
    let Json(request) = payload?;

    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let bio = request.bio.as_deref().map(str::trim);
    validate_profile_update(name, bio)?;

    let user = store_profile(&pool, current.user_id, name, bio)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND_MESSAGE))?;

    tracing::info!(user_id = %user.id, "Profile updated");
    Ok(Json(UserEnvelope::with_message("Profile updated successfully!", user)))
}
