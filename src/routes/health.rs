//! Root endpoint reporting MongoDB connectivity.
//!
//! The verdict comes from the shared `StatusWatch` kept current by the
//! driver's topology monitoring. The handler performs no I/O, so a down
//! deployment can never slow or hang the endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

/// Body returned while the deployment is reachable.
pub const CONNECTED_MESSAGE: &str = "Backend is running and connected to MongoDB!";

/// Body returned for every other connection status.
pub const DISCONNECTED_MESSAGE: &str = "Backend is running but NOT connected to MongoDB.";

/// JSON payload for the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub message: &'static str,
}

/// Connectivity status handler.
///
/// Reads the connection status at request time: 200 with the connected
/// message when the driver currently reports a healthy deployment, 500 with
/// the not-connected message otherwise.
pub async fn root(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    if state.mongo.current().is_connected() {
        (
            StatusCode::OK,
            Json(StatusBody {
                message: CONNECTED_MESSAGE,
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusBody {
                message: DISCONNECTED_MESSAGE,
            }),
        )
    }
}
