//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; the password pipeline reports its own
//! failures through logs and never stops the listener.

use demo_api::{DemoConfig, ServerConfig, app, demo};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo_api=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env()?;

    // Errors here should not prevent server startup
    let _pipeline = match DemoConfig::from_env() {
        Ok(demo_config) => {
            tracing::info!(salt_rounds = demo_config.salt_rounds, "Starting password demo");
            Some(demo::spawn(demo_config))
        }
        Err(e) => {
            tracing::error!(error = %e, "Password demo not started");
            None
        }
    };

    let app = app::build_app();

    let addr = server_config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
