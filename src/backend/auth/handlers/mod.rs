//! Authentication Handlers
//!
//! HTTP handlers for the authentication endpoints.
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`me`** - GET /api/auth/me (behind the auth gate)

use uuid::Uuid;

use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;

/// Request and response types
pub mod types;

/// User registration handler
pub mod register;

/// User authentication handler
pub mod login;

/// Get current user handler
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;

/// Issue a token for a handler response
///
/// Signing only fails on a broken key, so the error is internal.
pub(crate) fn issue_token(tokens: &TokenService, user_id: Uuid) -> Result<String, BackendError> {
    tokens.issue(user_id).map_err(|e| {
        tracing::error!(%user_id, "Failed to issue token: {}", e);
        BackendError::internal(e.to_string())
    })
}
