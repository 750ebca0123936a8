//! dbpulse: an HTTP status endpoint for MongoDB connectivity.
//!
//! This is the application entry point. It initializes tracing, loads the
//! MongoDB settings from the environment, builds the monitored client, kicks
//! off the connection attempt, and serves the status route until the process
//! is asked to shut down.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dbpulse::config::{AppConfig, DEFAULT_LOG_FILTER, HTTP_PORT};
use dbpulse::mongo::MongoMonitor;
use dbpulse::routes::create_router;
use dbpulse::state::AppState;

/// dbpulse: report MongoDB connectivity over HTTP
#[derive(Parser, Debug)]
#[command(name = "dbpulse", version, about)]
struct Args {
    /// Log level filter (e.g., "dbpulse=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // A .env file is honored when present; variables already set in the
    // process environment win
    dotenvy::dotenv().ok();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, refusing to start on missing or blank values
    let config = AppConfig::from_env()?;
    tracing::info!(
        host = %config.mongo_host,
        port = config.mongo_port,
        database = %config.mongo_db,
        "Loaded configuration"
    );

    // Build the monitored client and start the connection attempt in the
    // background; the listener comes up regardless of the outcome
    let monitor = MongoMonitor::new(&config).await?;
    monitor.spawn_initial_ping();

    // Create application state and router
    let state = AppState::new(monitor.status());
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], HTTP_PORT));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Listener drained; close the MongoDB client before exiting
    monitor.shutdown().await;

    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
