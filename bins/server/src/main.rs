//! Twynup API Server
//!
//! Main entry point for the upload authorization service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twynup_api::{AppState, create_router};
use twynup_core::storage::{StorageConfig, StorageService};
use twynup_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twynup=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Storage is optional at startup; presign requests answer 500 without it
    let storage = match StorageConfig::from_settings(&config.storage)
        .and_then(StorageService::from_config)
    {
        Ok(service) => {
            info!(
                bucket = %service.bucket(),
                region = %service.region(),
                ttl_secs = service.config().presign_upload_ttl_secs,
                "Storage configured"
            );
            Some(Arc::new(service))
        }
        Err(e) => {
            warn!(error = %e, "Storage not configured, presign requests will fail");
            None
        }
    };

    // Create application state
    let state = AppState::new(storage, config.environment.as_str())
        .with_body_limit(config.server.body_limit_bytes);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(env = %config.environment, "Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
