use std::net::SocketAddr;
use std::sync::Arc;

use keenetic_exporter::{
    AppError, AppState, Config, KeeneticClient, MetricsRegistry, Result, create_router,
    start_poll_loops,
};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;

    tracing::info!("Using router at {}", config.router.endpoint);
    tracing::info!(
        "Watching {} interface(s) and {} device(s)",
        config.interfaces.len(),
        config.devices.len()
    );
    for interface in &config.interfaces {
        tracing::info!("  - Interface '{}' ({})", interface.name, interface.code);
    }
    for device in &config.devices {
        tracing::info!("  - Device '{}' ({})", device.name, device.code);
    }

    let metrics = MetricsRegistry::new();

    // Log in once; every later poll reuses the session cookies
    let client = Arc::new(KeeneticClient::new(&config.router)?);
    client.authenticate().await.map_err(|e| {
        tracing::error!("Authentication failed: {}", e);
        e
    })?;
    tracing::info!("Authenticated against {}", client.endpoint());

    // Shutdown channel (graceful shutdown)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let loops = start_poll_loops(client, &config, metrics.clone(), shutdown_rx.clone());

    let addr: SocketAddr = config.server_addr.parse().map_err(|e| {
        tracing::error!("Invalid server address: {}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    let state = Arc::new(AppState { config, metrics });
    let app = create_router(state);

    tracing::info!("Keenetic Exporter starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /health  - Health check");
    tracing::info!("  - GET /metrics - Prometheus metrics");

    let mut server_shutdown = shutdown_rx.clone();
    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = server_shutdown.changed().await;
                tracing::info!("HTTP server shutting down");
            })
            .await
            .map_err(AppError::from)
    };

    // A failed poll or a failed server ends the process; the supervisor restarts it
    if let Err(e) = loops.wait_alongside(server).await {
        tracing::error!("Exporter stopped: {}", e);
        let _ = shutdown_tx.send(true);
        return Err(e);
    }

    Ok(())
}

fn setup_tracing() {
    // RUST_LOG controls the filter, "info" when unset
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
