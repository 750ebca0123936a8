//! HTTP route handlers for the status service.
//!
//! A single route reports MongoDB connectivity; everything else falls
//! through to the framework defaults (404 for unknown paths, 405 for other
//! methods on the root). The status route carries a Cache-Control header so
//! intermediaries never serve a stale verdict.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_STATUS;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the status route and its cache header.
pub fn create_router(state: AppState) -> Router {
    // Connectivity status - the verdict is per-request, never cached
    let status_routes = Router::new()
        .route("/", get(health::root))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATUS),
        ));

    Router::new()
        .merge(status_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
