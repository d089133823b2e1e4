/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once from a `ServerConfig` and holds:
 * - The configuration itself
 * - The SQLite connection pool
 * - The token service (signing keys and token lifetime)
 * - The credential store (bcrypt cost and dummy hash)
 *
 * Every field is cheap to clone and safe to share between requests; there
 * is no other shared mutable state in the server.
 *
 * # Lifecycle
 *
 * 1. `AppState::initialize(config)` connects, migrates and builds services
 * 2. The router serves requests with a clone of the state
 * 3. `AppState::shutdown()` closes the pool after the listener has drained
 *
 * # Example
 *
 * ```rust,no_run
 * use minilink::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _pool = &state.db_pool;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::credentials::CredentialStore;
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::database;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Configuration the state was built from
    pub config: Arc<ServerConfig>,

    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Issues and verifies bearer tokens
    pub tokens: TokenService,

    /// Registers users and checks their passwords
    pub credentials: CredentialStore,
}

impl AppState {
    /// Connect to the database, run migrations and build the services
    pub async fn initialize(config: ServerConfig) -> Result<Self, BackendError> {
        let db_pool = database::connect_and_migrate(&config.database_url)
            .await
            .map_err(|e| BackendError::internal(format!("database setup failed: {e}")))?;

        Self::with_pool(config, db_pool).await
    }

    /// Build the services around an existing, migrated pool
    pub async fn with_pool(config: ServerConfig, db_pool: SqlitePool) -> Result<Self, BackendError> {
        let tokens = TokenService::from_config(&config);
        let credentials = CredentialStore::new(db_pool.clone(), config.bcrypt_cost).await?;

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            tokens,
            credentials,
        })
    }

    /// Close the database pool
    ///
    /// Waits for checked-out connections to be returned.
    pub async fn shutdown(&self) {
        tracing::info!("Closing database pool");
        self.db_pool.close().await;
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for CredentialStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.credentials.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
