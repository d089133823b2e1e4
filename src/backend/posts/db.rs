//! Database operations for posts
//!
//! Posts live in `posts`; likes and comments live in their own tables keyed
//! by post. Loading a post reads the post row, then its likes and comments,
//! and assembles a `Post`.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::parse_stored_id;
use crate::backend::posts::models::{Comment, Post, UserRef};

const POST_SELECT: &str = r#"
    SELECT p.id, p.title, p.content, p.image, p.author_id, u.name AS author_name,
           p.created_at, p.updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

/// Result of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// True if the user likes the post after the toggle
    pub liked: bool,
    /// Number of likes after the toggle
    pub like_count: i64,
}

/// Create a new post
pub async fn create_post(
    pool: &SqlitePool,
    author_id: Uuid,
    title: &str,
    content: &str,
    image: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, title, content, image, author_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(title)
    .bind(content)
    .bind(image)
    .bind(author_id.to_string())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Get all posts, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "{POST_SELECT} ORDER BY p.created_at DESC, p.rowid DESC"
    ))
    .fetch_all(pool)
    .await?;

    assemble(pool, rows).await
}

/// Get one author's posts, newest first
pub async fn list_posts_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "{POST_SELECT} WHERE p.author_id = ? ORDER BY p.created_at DESC, p.rowid DESC"
    ))
    .bind(author_id.to_string())
    .fetch_all(pool)
    .await?;

    assemble(pool, rows).await
}

/// Get a post by ID
pub async fn get_post(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let row = sqlx::query(&format!("{POST_SELECT} WHERE p.id = ?"))
        .bind(post_id.to_string())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(assemble(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Update a post's title and/or content
///
/// # Returns
/// False if the post does not exist
pub async fn update_post(
    pool: &SqlitePool,
    post_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE(?, title), content = COALESCE(?, content), updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(Utc::now())
    .bind(post_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a post; its likes and comments cascade
///
/// # Returns
/// False if the post does not exist
pub async fn delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Toggle `user_id`'s like on a post in a single transaction
///
/// Removes the like if present, adds it otherwise. The membership row is the
/// unit of change, so two concurrent toggles serialize on the write lock and
/// never lose an update.
///
/// # Returns
/// None if the post does not exist
pub async fn toggle_like(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<LikeToggle>, sqlx::Error> {
    let post_key = post_id.to_string();
    let user_key = user_id.to_string();

    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
        .bind(&post_key)
        .bind(&user_key)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let liked = if removed > 0 {
        false
    } else {
        let exists = sqlx::query("SELECT 1 FROM posts WHERE id = ?")
            .bind(&post_key)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            return Ok(None);
        }

        sqlx::query("INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&post_key)
            .bind(&user_key)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        true
    };

    let like_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_likes WHERE post_id = ?")
        .bind(&post_key)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(LikeToggle { liked, like_count }))
}

/// Add a comment to a post
///
/// Fails with a foreign-key violation if the post was deleted meanwhile.
pub async fn add_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO post_comments (id, post_id, user_id, body, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(post_id.to_string())
    .bind(user_id.to_string())
    .bind(text)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Attach likes and comments to post rows, preserving row order
async fn assemble(pool: &SqlitePool, rows: Vec<SqliteRow>) -> Result<Vec<Post>, sqlx::Error> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let keys: Vec<String> = rows
        .iter()
        .map(|row| row.try_get::<String, _>("id"))
        .collect::<Result<_, _>>()?;

    let mut likes = load_likes(pool, &keys).await?;
    let mut comments = load_comments(pool, &keys).await?;

    rows.into_iter()
        .map(|row| -> Result<Post, sqlx::Error> {
            let key: String = row.try_get("id")?;
            let likes = likes.remove(&key).unwrap_or_default();
            let comments = comments.remove(&key).unwrap_or_default();

            Ok(Post {
                id: parse_stored_id(&key)?,
                title: row.try_get("title")?,
                content: row.try_get("content")?,
                image: row.try_get("image")?,
                author: UserRef {
                    id: parse_stored_id(&row.try_get::<String, _>("author_id")?)?,
                    name: row.try_get("author_name")?,
                },
                like_count: likes.len(),
                likes,
                comment_count: comments.len(),
                comments,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect()
}

async fn load_likes(pool: &SqlitePool, post_keys: &[String]) -> Result<HashMap<String, Vec<Uuid>>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT post_id, user_id FROM post_likes WHERE post_id IN (");
    let mut ids = query.separated(", ");
    for key in post_keys {
        ids.push_bind(key.as_str());
    }
    ids.push_unseparated(") ORDER BY created_at, rowid");

    let rows = query.build().fetch_all(pool).await?;

    let mut likes: HashMap<String, Vec<Uuid>> = HashMap::new();
    for row in rows {
        let post_id: String = row.try_get("post_id")?;
        let user_id: String = row.try_get("user_id")?;
        likes.entry(post_id).or_default().push(parse_stored_id(&user_id)?);
    }
    Ok(likes)
}

async fn load_comments(
    pool: &SqlitePool,
    post_keys: &[String],
) -> Result<HashMap<String, Vec<Comment>>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT c.id, c.post_id, c.user_id, u.name AS user_name, c.body, c.created_at
        FROM post_comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id IN (
        "#,
    );
    let mut ids = query.separated(", ");
    for key in post_keys {
        ids.push_bind(key.as_str());
    }
    ids.push_unseparated(") ORDER BY c.created_at, c.rowid");

    let rows = query.build().fetch_all(pool).await?;

    let mut comments: HashMap<String, Vec<Comment>> = HashMap::new();
    for row in rows {
        let post_id: String = row.try_get("post_id")?;
        comments.entry(post_id).or_default().push(Comment {
            id: parse_stored_id(&row.try_get::<String, _>("id")?)?,
            user: UserRef {
                id: parse_stored_id(&row.try_get::<String, _>("user_id")?)?,
                name: row.try_get("user_name")?,
            },
            text: row.try_get("body")?,
            created_at: row.try_get("created_at")?,
        });
    }
    Ok(comments)
}
