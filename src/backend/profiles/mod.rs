//! Profiles Module
//!
//! HTTP handlers under `/api/users`. User records themselves are owned by
//! `backend::auth::users`.

/// HTTP handlers
pub mod handlers;

pub use handlers::{get_profile, get_user_posts, update_profile};
