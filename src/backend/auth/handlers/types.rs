/**
 * Authentication Handler Types
 *
 * Request and response bodies for the authentication endpoints. `UserResponse`
 * is also used by the profile endpoints.
 *
 * Request fields default to empty strings so a missing field is reported by
 * validation ("Name is required") instead of as an unparseable body.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name (2-50 chars)
    pub name: String,
    /// Email address, normalized before storage
    pub email: String,
    /// Raw password (at least 6 chars), hashed before storage
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth response
///
/// Returned by register and login with a freshly issued token.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: &'static str,
    /// Bearer token (7-day expiration)
    pub token: String,
    pub user: UserResponse,
}

/// Single user wrapped in the success envelope
#[derive(Serialize, Debug)]
pub struct UserEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub user: UserResponse,
}

impl UserEnvelope {
    pub fn new(user: impl Into<UserResponse>) -> Self {
        Self {
            success: true,
            message: None,
            user: user.into(),
        }
    }

    pub fn with_message(message: &'static str, user: impl Into<UserResponse>) -> Self {
        Self {
            success: true,
            message: Some(message),
            user: user.into(),
        }
    }
}

/// User response (without sensitive data)
///
/// The only user shape that leaves the server. Does not include the
/// password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}
