//! HTTP status endpoint reporting MongoDB connectivity.
//!
//! A single-route axum service: `GET /` answers 200 while the MongoDB
//! deployment is reachable and 500 otherwise. The verdict mirrors the
//! driver's own topology monitoring, so no request ever waits on the
//! database.

pub mod config;
pub mod middleware;
pub mod mongo;
pub mod routes;
pub mod state;
