//! MongoDB client ownership and connectivity monitoring.
//!
//! `MongoMonitor` builds the client from the composed connection string and
//! mirrors the driver's topology events into a `StatusWatch`. The driver's
//! own server monitoring decides when the deployment is reachable; nothing
//! here polls or retries. Request handlers observe the watch without ever
//! touching the client.

pub mod status;

use mongodb::bson::doc;
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::config::AppConfig;

pub use status::{ConnectionStatus, StatusWatch};

/// Owns the MongoDB client and the shared connection status.
pub struct MongoMonitor {
    client: Client,
    database: String,
    status: StatusWatch,
}

impl MongoMonitor {
    /// Build the client for the configured deployment with topology events
    /// wired into a fresh `StatusWatch`. Performs no I/O; monitoring and the
    /// first connection attempt proceed in the background.
    pub async fn new(config: &AppConfig) -> Result<Self, mongodb::error::Error> {
        let status = StatusWatch::new();

        let mut options = ClientOptions::parse(config.connection_string()).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let watch = status.clone();
        options.sdam_event_handler = Some(EventHandler::callback(move |event: SdamEvent| {
            apply_sdam_event(&watch, &event);
        }));

        let client = Client::with_options(options)?;

        Ok(Self {
            client,
            database: config.mongo_db.clone(),
            status,
        })
    }

    /// Handle for observing the connection status.
    pub fn status(&self) -> StatusWatch {
        self.status.clone()
    }

    /// Issue a single ping so the first connection attempt is made and its
    /// outcome logged at startup. The result only affects logs: monitoring
    /// keeps the status current either way, and a failure is not retried.
    pub fn spawn_initial_ping(&self) {
        let client = self.client.clone();
        let database = self.database.clone();

        tokio::spawn(async move {
            match client.database(&database).run_command(doc! { "ping": 1 }).await {
                Ok(_) => {
                    tracing::info!("Connected to MongoDB");
                }
                Err(e) => {
                    tracing::error!(error = %e, "MongoDB connection error");
                }
            }
        });
    }

    /// Close the client, driving the status through the disconnect sequence.
    pub async fn shutdown(self) {
        let Self { client, status, .. } = self;

        status.store(ConnectionStatus::Disconnecting);
        tracing::debug!("Closing MongoDB client");

        client.shutdown().await;

        status.store(ConnectionStatus::Disconnected);
        tracing::info!("MongoDB client closed");
    }
}

/// Mirror a topology event into the shared status.
///
/// Only transitions are logged, so a deployment that stays down does not
/// flood the log with repeated heartbeat failures.
fn apply_sdam_event(status: &StatusWatch, event: &SdamEvent) {
    match event {
        SdamEvent::ServerOpening(event) => {
            if status.mark_connecting() {
                tracing::debug!(address = %event.address, "MongoDB server monitoring started");
            }
        }
        SdamEvent::ServerHeartbeatSucceeded(event) => {
            let previous = status.store(ConnectionStatus::Connected);
            if previous != ConnectionStatus::Connected {
                tracing::debug!(address = %event.server_address, "MongoDB heartbeat succeeded");
            }
        }
        SdamEvent::ServerHeartbeatFailed(event) => {
            let previous = status.store(ConnectionStatus::Disconnected);
            if previous != ConnectionStatus::Disconnected {
                tracing::warn!(
                    address = %event.server_address,
                    error = %event.failure,
                    "MongoDB heartbeat failed"
                );
            }
        }
        SdamEvent::ServerClosed(event) => {
            let previous = status.store(ConnectionStatus::Disconnected);
            if previous != ConnectionStatus::Disconnected {
                tracing::debug!(address = %event.address, "MongoDB server monitoring stopped");
            }
        }
        SdamEvent::TopologyClosed(_) => {
            status.store(ConnectionStatus::Disconnected);
        }
        // Description-changed and heartbeat-started events carry no
        // reachability verdict of their own.
        _ => {}
    }
}
