/**
 * API Routes
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/test` - Health check
 * - `POST /api/auth/register`, `POST /api/auth/login`
 * - `GET /api/posts`, `GET /api/posts/{id}`
 * - `GET /api/users/{id}`, `GET /api/users/{id}/posts`
 *
 * ## Behind the auth gate (middleware)
 * - `GET /api/auth/me`
 * - `PUT /api/posts/{id}/like`
 * - `POST /api/posts/{id}/comments`
 * - `PUT /api/users/profile`
 *
 * ## Behind the auth gate (`AuthUser` extractor)
 * - `POST /api/posts`
 * - `PUT /api/posts/{id}`, `DELETE /api/posts/{id}` (plus ownership guard)
 *
 * These share a path with public reads, so the gate runs per handler
 * instead of as a layer on the path.
 *
 * A known path called with an unsupported method gets the same JSON 404 as
 * an unknown `/api` path.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    response::Json,
    routing::{any, get, post, put},
    Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::backend::auth::{get_me, login, register};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::posts::handlers::{
    add_comment, create_post, delete_post, get_post, list_posts, toggle_like, update_post,
};
use crate::backend::profiles::{get_profile, get_user_posts, update_profile};
use crate::backend::server::state::AppState;

pub const API_NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Backend is working!",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Any `/api/*` path without a route, or a known path with the wrong method
pub async fn api_not_found() -> BackendError {
    BackendError::not_found(API_NOT_FOUND_MESSAGE)
}

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State for the auth middleware and the upload body limit
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/posts/{id}/like", put(toggle_like))
        .route("/api/posts/{id}/comments", post(add_comment))
        .route("/api/users/profile", put(update_profile))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/api/test", get(health))
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Post endpoints
        .route(
            "/api/posts",
            get(list_posts)
                .post(create_post)
                .layer(DefaultBodyLimit::max(app_state.config.upload_body_limit())),
        )
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        // Profile endpoints
        .route("/api/users/{id}", get(get_profile))
        .route("/api/users/{id}/posts", get(get_user_posts))
        .merge(protected)
        .route("/api/{*rest}", any(api_not_found))
        // Added last so it covers every route above
        .method_not_allowed_fallback(api_not_found)
}
