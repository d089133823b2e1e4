/**
 * Get Current User Handler
 *
 * GET /api/auth/me. Runs behind the auth gate, which has already resolved
 * the user; this handler only shapes the response.
 */

use axum::{response::Json, Extension};

use crate::backend::auth::handlers::types::UserEnvelope;
use crate::backend::middleware::auth::AuthenticatedUser;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "success": true,
///   "user": { "_id": "…", "name": "Alice", "email": "alice@x.com", "bio": "", "createdAt": "…" }
/// }
/// ```
pub async fn get_me(Extension(current): Extension<AuthenticatedUser>) -> Json<UserEnvelope> {
    Json(UserEnvelope::new(current.user))
}
