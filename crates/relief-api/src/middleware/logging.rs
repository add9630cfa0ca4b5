//! One log line per request.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Logs method, path, status and latency. 5xx responses log at `warn`.
///
/// The query string is left out because refresh and lookup URLs may carry
/// NICs.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    if status.is_server_error() {
        warn!(method, path, status = status.as_u16(), latency_ms, "Request failed");
    } else {
        info!(method, path, status = status.as_u16(), latency_ms, "Request served");
    }
    response
}
