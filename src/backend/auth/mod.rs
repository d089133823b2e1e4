//! Authentication Module
//!
//! This module handles identity: who a request comes from and what they may
//! change.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`credentials`** - Credential store (registration, password checks)
//! - **`sessions`** - Token service (issue and verify bearer tokens)
//! - **`ownership`** - Ownership guard for edits and deletions
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! The auth gate that ties tokens to requests lives in
//! `backend::middleware::auth`.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── credentials.rs  - Credential store
//! ├── sessions.rs     - Token service
//! ├── ownership.rs    - Ownership guard
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - User authentication handler
//!     └── me.rs       - Get current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user created → token returned
//! 2. **Login**: email, password → credentials verified → token returned
//! 3. **Protected request**: token → gate verifies and loads user → handler
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt; the hash never leaves the server
//! - Tokens are HS256 JWTs that expire after 7 days and are never revoked
//! - Failed logins do not reveal whether the email exists

/// User data model and database operations
pub mod users;

/// Registration and password verification
pub mod credentials;

/// Bearer token issuance and verification
pub mod sessions;

/// Author-only checks for mutations
pub mod ownership;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use credentials::CredentialStore;
pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{get_me, login, register};
pub use ownership::{assert_owner, OwnerAction, Owned};
pub use sessions::{TokenError, TokenService};
