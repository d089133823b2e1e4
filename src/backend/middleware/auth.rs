/**
 * Authentication Middleware
 *
 * The auth gate for protected routes. It extracts the bearer token from the
 * `Authorization` header, verifies it, resolves it to a user and attaches
 * that user (without the password hash) to the request.
 *
 * # Failure Causes
 *
 * Every failure is a 401 with its own message:
 *
 * | Cause | `AuthFailure` |
 * |---|---|
 * | Header absent or not `Bearer <token>` | `MissingToken` |
 * | Bad signature or broken token | `InvalidToken` |
 * | Past its expiry | `TokenExpired` |
 * | User deleted since the token was issued | `UserNotFound` |
 *
 * # Usage
 *
 * Routes that are always protected sit behind `auth_middleware`. Handlers on
 * paths that mix public and protected methods take `AuthUser` directly; it
 * reuses the middleware's result when present and runs the gate otherwise.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{AuthFailure, BackendError};
use crate::backend::server::state::AppState;

/// Authenticated user data resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub user: UserResponse,
}

impl From<TokenError> for AuthFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthFailure::TokenExpired,
            TokenError::Malformed | TokenError::InvalidSignature | TokenError::Signing(_) => {
                AuthFailure::InvalidToken
            }
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Run the auth gate against a set of request headers
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthenticatedUser, BackendError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::Unauthenticated(AuthFailure::MissingToken)
    })?;

    let user_id = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Token rejected: {}", e);
        BackendError::Unauthenticated(AuthFailure::from(e))
    })?;

    let user = get_user_by_id(&state.db_pool, user_id).await?.ok_or_else(|| {
        tracing::warn!(%user_id, "Token names a user that no longer exists");
        BackendError::Unauthenticated(AuthFailure::UserNotFound)
    })?;

    Ok(AuthenticatedUser {
        user_id,
        user: UserResponse::from(user),
    })
}

/// Authentication middleware
///
/// Attaches `AuthenticatedUser` to the request extensions, or answers 401
/// without calling the handler.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(&app_state, request.headers()).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let user = authenticate(state, &parts.headers).await?;
        parts.extensions.insert(user.clone());
        Ok(AuthUser(user))
    }
}
