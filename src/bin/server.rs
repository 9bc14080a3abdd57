//! HTTP entry point: wires the engine together from `RateLimiterSettings`
//! and serves the `axum` router until interrupted.

use std::sync::Arc;

use tenant_ratelimit::analytics::Analytics;
use tenant_ratelimit::clock::SystemClock;
use tenant_ratelimit::gateway::Gateway;
use tenant_ratelimit::http;
use tenant_ratelimit::settings::RateLimiterSettings;
use tenant_ratelimit::store::InMemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let settings = RateLimiterSettings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Arc::new(InMemoryStore::with_log_capacity(settings.log_buffer_capacity));
    let analytics = Arc::new(Analytics::with_ring_capacity(settings.analytics_ring_capacity));
    let gateway = Arc::new(Gateway::new(store, analytics, Arc::new(SystemClock::new())));

    let app = http::router(gateway);
    let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;

    tracing::info!(address = %settings.bind_address, "tenant-ratelimit-server listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
