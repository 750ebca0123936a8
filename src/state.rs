//! Shared application state for request handlers.

use crate::mongo::StatusWatch;

/// Shared application state, cloneable across handlers.
///
/// Carries the connection status handle. Handlers read it synchronously and
/// never touch the MongoDB client itself, so tests can build the state from
/// a bare watch and exercise the HTTP surface without a deployment.
#[derive(Clone)]
pub struct AppState {
    pub mongo: StatusWatch,
}

impl AppState {
    /// Creates application state observing the given status handle.
    pub fn new(mongo: StatusWatch) -> Self {
        Self { mongo }
    }
}
