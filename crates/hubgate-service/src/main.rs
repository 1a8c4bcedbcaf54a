//! Hubgate Service - webhook signature verification gate
//!
//! This is the main entry point for the hubgate service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hubgate_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hubgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hubgate Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        webhook_path = %config.webhook_path,
        signature_scheme = %config.signature_scheme,
        max_body_bytes = config.max_body_bytes,
        "Service configuration loaded"
    );

    // Build app state (fails without a webhook secret)
    let state = AppState::new(config.clone()).map_err(|e| {
        tracing::error!(error = %e, "Refusing to start");
        e
    })?;

    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
