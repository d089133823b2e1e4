/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Reject the email if already registered (case-insensitive)
 * 3. Hash the password and create the user
 * 4. Issue a token so the client is signed in immediately
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::credentials::CredentialStore;
use crate::backend::auth::handlers::issue_token;
use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid fields, or the email is already registered
/// * `500 Internal Server Error` - Hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Alice", "email": "alice@x.com", "password": "secret1" }
/// ```
pub async fn register(
    State(credentials): State<CredentialStore>,
    State(tokens): State<TokenService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let Json(request) = payload?;

    let user = credentials
        .register(&request.name, &request.email, &request.password)
        .await?;
    let token = issue_token(&tokens, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "Account created successfully!",
            token,
            user: UserResponse::from(user),
        }),
    ))
}
