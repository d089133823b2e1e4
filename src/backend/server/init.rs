/**
 * Server Initialization
 *
 * This module turns a `ServerConfig` into a ready-to-serve router.
 *
 * # Initialization Process
 *
 * 1. Ensure the upload directory exists
 * 2. Connect to the database and run migrations
 * 3. Build the token service and credential store
 * 4. Create and configure the router
 *
 * Any failure is returned and the binary exits before binding a socket.
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// The router, and the state it serves so the caller can shut it down once
/// the listener has stopped.
pub async fn create_app(config: ServerConfig) -> Result<(Router<()>, AppState), BackendError> {
    tracing::info!("Initializing minilink backend server");

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!(dir = %config.upload_dir.display(), "Upload directory ready");

    let app_state = AppState::initialize(config).await?;
    let app = create_router(app_state.clone());

    tracing::info!("Router configured");
    Ok((app, app_state))
}
