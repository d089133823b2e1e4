//! Minilink - Main Library
//!
//! Minilink is the backend of a small professional social network: people
//! register, sign in, publish short updates with an image, like and comment on
//! each other's posts, and browse profiles.
//!
//! # Overview
//!
//! This library provides:
//! - A credential store with bcrypt-hashed passwords
//! - Signed, time-limited bearer tokens (HS256 JWT)
//! - An authentication gate for protected endpoints
//! - An ownership guard for edits and deletions of posts
//! - REST handlers for users, posts, likes, comments and image uploads
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependency
//!   - Input validation rules and field errors
//!
//! - **`backend`** - Axum HTTP server
//!   - Configuration, state and lifecycle
//!   - Authentication, authorization and resource handlers
//!   - SQLite persistence through sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use minilink::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let (app, state) = create_app(config).await?;
//! // Serve `app`, then `state.shutdown().await` once the listener stops
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation failures
//! - `backend::error::BackendError` for everything a handler can return,
//!   mapped exhaustively onto HTTP status codes and a JSON envelope

/// Shared types and validation rules
pub mod shared;

/// Backend server-side code
pub mod backend;
