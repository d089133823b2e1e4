//! Posts Module
//!
//! Posts with an image, likes and comments.
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs      - Module exports and documentation
//! ├── models.rs   - Post, Comment and UserRef
//! ├── types.rs    - Request/response bodies
//! ├── db.rs       - Database operations, including the atomic like toggle
//! ├── uploads.rs  - Multipart parsing and image storage
//! └── handlers.rs - HTTP handlers
//! ```

/// Post models
pub mod models;

/// Request and response types
pub mod types;

/// Database operations
pub mod db;

/// Image uploads
pub mod uploads;

/// HTTP handlers
pub mod handlers;

pub use models::{Comment, Post, UserRef};
