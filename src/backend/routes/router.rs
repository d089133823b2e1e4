/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (`/api/...`), with a JSON 404 for unknown API paths
 * 2. Uploaded images (`/uploads/...`)
 * 3. Fallback: the frontend build if configured, a JSON 404 otherwise
 *
 * Every response passes through request tracing and permissive CORS.
 */

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::{api_not_found, configure_api_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let router = configure_api_routes(Router::new(), &app_state);

    // Uploaded images
    let router = router.nest_service("/uploads", ServeDir::new(&config.upload_dir));

    // Frontend build, with index.html for client-side routes
    let router = match &config.frontend_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Serving frontend build");
            router.fallback_service(
                ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
            )
        }
        None => router.fallback(api_not_found),
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
