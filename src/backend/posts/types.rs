/**
 * Post Handler Types
 */

use serde::{Deserialize, Serialize};

use crate::backend::posts::models::Post;

/// Partial update of a post; absent fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// New comment
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CommentRequest {
    pub text: String,
}

/// Single post wrapped in the success envelope
#[derive(Serialize, Debug)]
pub struct PostEnvelope {
    pub success: bool,
    pub message: &'static str,
    pub post: Post,
}

impl PostEnvelope {
    pub fn new(message: &'static str, post: Post) -> Self {
        Self {
            success: true,
            message,
            post,
        }
    }
}

/// Result of a like toggle
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub message: &'static str,
    /// Whether the caller likes the post now
    pub liked: bool,
    pub like_count: i64,
    pub post: Post,
}

/// Success envelope without a payload
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}
