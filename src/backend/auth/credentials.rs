/**
 * Credential Store
 *
 * Registers users and verifies their credentials. Raw passwords exist only
 * for the duration of these two calls; only the bcrypt hash is persisted.
 *
 * # Enumeration Resistance
 *
 * `verify` fails with the same `InvalidCredentials` error whether the email
 * is unknown or the password is wrong, and in the unknown-email case it
 * still performs a bcrypt comparison against a dummy hash so the two paths
 * take comparable time.
 */

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::backend::auth::users::{self, User};
use crate::backend::error::BackendError;
use crate::shared::validation::{normalize_email, validate_login, validate_registration};

/// Message for a registration whose email is already taken
pub const DUPLICATE_EMAIL_MESSAGE: &str = "An account with this email already exists.";

const DUMMY_PASSWORD: &str = "minilink-dummy-password";

/// Registers and verifies users
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
    cost: u32,
    dummy_hash: Arc<str>,
}

impl CredentialStore {
    /// Create a store hashing at `cost`
    ///
    /// Computes the dummy hash once up front, at the same cost as real ones.
    pub async fn new(pool: SqlitePool, cost: u32) -> Result<Self, BackendError> {
        let dummy_hash = hash_password(DUMMY_PASSWORD.to_string(), cost).await?;
        Ok(Self {
            pool,
            cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Register a new user
    ///
    /// Validates the fields, normalizes the email and rejects it if it is
    /// already registered, case-insensitively.
    ///
    /// # Errors
    /// - `Validation` if a field breaks its rule
    /// - `Conflict` if the email is taken, including a concurrent registration
    ///   that wins the insert
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, BackendError> {
        validate_registration(name, email, password)?;

        let name = name.trim();
        let email = normalize_email(email);

        if users::get_user_by_email(&self.pool, &email).await?.is_some() {
            tracing::warn!("Registration rejected: email already registered");
            return Err(BackendError::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = hash_password(password.to_string(), self.cost).await?;

        let user = users::create_user(&self.pool, name, &email, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    tracing::warn!("Registration lost race on unique email");
                    BackendError::conflict(DUPLICATE_EMAIL_MESSAGE)
                } else {
                    BackendError::from(e)
                }
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check an email/password pair
    ///
    /// # Errors
    /// - `Validation` if the email is malformed or the password empty
    /// - `InvalidCredentials` for an unknown email or a wrong password
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, BackendError> {
        validate_login(email, password)?;

        let email = normalize_email(email);
        let user = users::get_user_by_email(&self.pool, &email).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let matches = verify_password(password.to_string(), hash).await?;

        match user {
            Some(user) if matches => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            _ => {
                tracing::warn!("Login rejected: invalid credentials");
                Err(BackendError::InvalidCredentials)
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// Hash on the blocking pool; bcrypt is CPU-bound
async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {e}")))?
        .map_err(|e| BackendError::internal(format!("password hashing failed: {e}")))
}

async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("verification task failed: {e}")))?
        .map_err(|e| BackendError::internal(format!("password verification failed: {e}")))
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
