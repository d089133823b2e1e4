//! Middleware Module
//!
//! - **`auth`** - The auth gate: bearer token verification and user lookup

/// Authentication middleware and extractor
pub mod auth;

pub use auth::{auth_middleware, authenticate, AuthUser, AuthenticatedUser};
