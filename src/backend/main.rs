/**
 * Minilink Server Entry Point
 *
 * Loads configuration, starts the Axum server and shuts it down cleanly on
 * Ctrl+C or SIGTERM.
 */

use minilink::backend::server::{create_app, ServerConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "minilink=debug,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            eprintln!("[STARTUP] Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let addr = config.socket_addr();
    let (app, state) = create_app(config).await?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Test the API at: http://{}/api/test", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
