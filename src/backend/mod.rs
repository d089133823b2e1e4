//! Backend Module
//!
//! This module contains all server-side code for minilink: an Axum HTTP
//! server over a SQLite database.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, database setup, state and lifecycle
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credential store, token service, ownership guard, auth handlers
//! - **`middleware`** - The auth gate
//! - **`posts`** - Posts, likes, comments and image uploads
//! - **`profiles`** - Public profiles and profile updates
//! - **`extract`** - Path identifier parsing
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and authorization
//! ├── middleware/     - Request middleware
//! ├── posts/          - Post endpoints and storage
//! ├── profiles/       - Profile endpoints
//! ├── extract.rs      - Request extraction helpers
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! client credentials → credential store → token service issues a token →
//! client resends it as `Authorization: Bearer <token>` → auth gate verifies
//! it and loads the user → ownership guard checks the author before an edit
//! or delete.
//!
//! # State Management
//!
//! `AppState` holds the configuration, the connection pool, the token service
//! and the credential store. All of them are cheap to clone; the database is
//! the only shared mutable resource.
//!
//! # Error Handling
//!
//! Every handler returns `Result<_, BackendError>`. The error maps each
//! variant to a status code and the `{ success: false, message, errors? }`
//! envelope.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Posts, likes and comments
pub mod posts;

/// User profile endpoints
pub mod profiles;

/// Request extraction helpers
pub mod extract;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
