/**
 * Post Models
 *
 * The post as the API returns it: author and commenters carry their display
 * name, likes are the set of user ids that liked the post, and both lists
 * come with their counts.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::ownership::Owned;

/// A user as referenced from a post or comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// Comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: UserRef,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Post with its author, likes and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Public path of the uploaded image, e.g. `/uploads/<file>`
    pub image: String,
    pub author: UserRef,
    /// Ids of users who like the post, in the order they liked it
    pub likes: Vec<Uuid>,
    pub like_count: usize,
    /// Oldest first
    pub comments: Vec<Comment>,
    pub comment_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.author.id
    }
}
