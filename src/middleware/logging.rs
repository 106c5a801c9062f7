//! Logging middleware
//!
//! Span and response hooks plugged into `tower_http::trace::TraceLayer`
//! so every HTTP request gets one span and one completion line.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use tracing::{info, info_span, warn, Span};

/// Span opened for each incoming request
pub fn make_request_span(request: &Request<Body>) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Log the outcome of a request once the response head is ready
pub fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;

    if status.is_server_error() {
        warn!(status = status.as_u16(), latency_ms = latency_ms, "Request failed");
    } else {
        info!(status = status.as_u16(), latency_ms = latency_ms, "Request completed");
    }
}
