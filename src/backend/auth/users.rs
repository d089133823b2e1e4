/**
 * User Model and Database Operations
 *
 * This module handles user records and their persistence. Identifiers are
 * stored as text and parsed back into `Uuid` when a row is loaded.
 *
 * `User` carries the password hash and is never serialized; handlers answer
 * with `UserResponse` instead.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, bio, created_at, updated_at";

/// User row as stored in the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    bio: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// User struct representing a user in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name (2-50 chars)
    pub name: String,
    /// Normalized email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Free-form profile text, empty when unset
    pub bio: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_stored_id(&row.id)?,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            bio: row.bio,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Parse an identifier read back from a text column
pub(crate) fn parse_stored_id(raw: &str) -> Result<Uuid, sqlx::Error> {
    Uuid::parse_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name, already trimmed
/// * `email` - Normalized email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user, or a unique-constraint error if the email is taken
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (id, name, email, password_hash, bio, created_at, updated_at)
        VALUES (?, ?, ?, ?, '', ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id.to_string())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    User::try_from(row)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

/// Update a user's name and/or bio
///
/// Fields passed as `None` keep their stored value. Email and password are
/// not changeable here.
///
/// # Returns
/// Updated user or None if the user no longer exists
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    name: Option<&str>,
    bio: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users
        SET name = COALESCE(?, name), bio = COALESCE(?, bio), updated_at = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(bio)
    .bind(Utc::now())
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}
