/**
 * Backend Error Types
 *
 * This module defines the single error type returned by every component of
 * the backend: the credential store, the token service, the auth gate, the
 * ownership guard and the resource handlers.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - Input failed the field rules (400, with field errors)
 * - `BadRequest` - Body or identifier could not be parsed at all (400)
 * - `InvalidCredentials` - Login failed; never says which field was wrong (400)
 * - `Conflict` - Email already registered (400)
 * - `Unauthenticated` - Missing/invalid/expired token or deleted user (401)
 * - `Forbidden` - Authenticated but not the owner of the resource (401)
 * - `NotFound` - Identifier does not resolve (404)
 *
 * ## Server Errors
 *
 * - `Database` - sqlx failure (500)
 * - `Io` - File system failure while handling uploads (500)
 * - `Internal` - Hashing or token signing failure (500)
 *
 * Server errors are logged with their cause and reported to the client with a
 * generic message only.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::{FieldError, SharedError};

/// Message sent for every 5xx response
pub const GENERIC_SERVER_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Message sent with field-level validation failures
pub const VALIDATION_MESSAGE: &str = "Please check your input and try again.";

/// Message sent for failed logins, whichever half of the credentials was wrong
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";

/// Why the auth gate rejected a request
///
/// All causes share status 401; each has its own message so the client can
/// tell the user what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization: Bearer <token>` header
    MissingToken,
    /// Signature mismatch or structurally broken token
    InvalidToken,
    /// Signature valid but past its expiry
    TokenExpired,
    /// Token is valid but the account it names no longer exists
    UserNotFound,
}

impl AuthFailure {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingToken => "No token provided. Please login.",
            Self::InvalidToken => "Invalid token. Please login again.",
            Self::TokenExpired => "Token expired. Please login again.",
            Self::UserNotFound => "User not found. Please login again.",
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use minilink::backend::error::BackendError;
///
/// let err = BackendError::not_found("Post not found.");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Input failed one or more field rules
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Request could not be parsed (malformed JSON, identifier or form data)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Human-readable error message
        message: String,
    },

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Uniqueness violation, e.g. an email that is already registered
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// The auth gate rejected the request
    #[error("Unauthenticated: {0}")]
    Unauthenticated(AuthFailure),

    /// The acting user does not own the resource
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// The requested resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Description for the server log; never sent to the client
        message: String,
    },
}

impl BackendError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `BadRequest`, `InvalidCredentials`, `Conflict` - 400
    /// - `Unauthenticated` - 401
    /// - `Forbidden` - 401, matching what existing clients expect
    /// - `NotFound` - 404
    /// - `Database`, `Io`, `Internal` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message shown to the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation(_) => VALIDATION_MESSAGE.to_string(),
            Self::BadRequest { message } => message.clone(),
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::Conflict { message } => message.clone(),
            Self::Unauthenticated(failure) => failure.message().to_string(),
            Self::Forbidden { message } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::Database(_) | Self::Io(_) | Self::Internal { .. } => {
                GENERIC_SERVER_MESSAGE.to_string()
            }
        }
    }

    /// Field errors attached to the response, if any
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::Validation(err) => Some(err.field_errors()),
            _ => None,
        }
    }

    /// True for errors caused by the server rather than the request
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
