//! Request correlation middleware.
//!
//! Wraps every request in a tracing span carrying a UUID v4 request ID, the
//! method, and the path, then logs one completion line. Every log emitted
//! while a request is handled carries the span fields, so a single request's
//! lines can be pulled out of interleaved output.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Wrap the request in a span identified by a fresh request ID.
///
/// Applied as the outermost layer so the span covers the whole pipeline.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    );

    async move {
        let start = Instant::now();
        let response = next.run(request).await;

        let span = tracing::Span::current();
        span.record("status", response.status().as_u16());
        span.record("latency_ms", start.elapsed().as_millis() as u64);
        tracing::info!("Request completed");

        response
    }
    .instrument(span)
    .await
}
