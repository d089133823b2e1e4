/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 400 response
 * - Passwords are never logged or returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::credentials::CredentialStore;
use crate::backend::auth::handlers::issue_token;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;

/// Login handler
///
/// Verifies the email and password and returns a fresh token.
///
/// # Errors
///
/// * `400 Bad Request` - Malformed input, or "Invalid email or password."
/// * `500 Internal Server Error` - Database or token failure
pub async fn login(
    State(credentials): State<CredentialStore>,
    State(tokens): State<TokenService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;

    let user = credentials.verify(&request.email, &request.password).await?;
    let token = issue_token(&tokens, user.id)?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful!",
        token,
        user: UserResponse::from(user),
    }))
}
