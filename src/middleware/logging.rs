//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Response header carrying the generated request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests slower than this are logged as slow
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(5);

/// Request logging middleware
///
/// Tags each request with a fresh id, logs start and completion, and echoes
/// the id back in the `x-request-id` response header.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        let headers = request.headers();
        info!(
            "Request started: {} {} - Client: {} - User-Agent: {}",
            method,
            uri,
            get_client_ip(headers).unwrap_or_else(|| "unknown".to_string()),
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
        );

        let mut response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();
        let millis = duration.as_secs_f64() * 1000.0;

        if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, millis);
        } else if status.is_server_error() {
            warn!("Server error: {} - Duration: {:.2}ms", status, millis);
        } else {
            info!("Request completed: {} - Duration: {:.2}ms", status, millis);
        }

        if duration > SLOW_REQUEST_THRESHOLD {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri,
                duration.as_secs_f64()
            );
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Get client IP address
pub fn get_client_ip(headers: &HeaderMap) -> Option<String> {
    // Check different IP headers by priority
    let ip_headers = [
        "x-forwarded-for",
        "x-real-ip",
        "x-client-ip",
        "cf-connecting-ip", // Cloudflare
    ];

    for header_name in &ip_headers {
        if let Some(ip_str) = headers.get(*header_name).and_then(|v| v.to_str().ok()) {
            // X-Forwarded-For may contain multiple IPs, take the first one
            if let Some(first_ip) = ip_str.split(',').next() {
                let ip = first_ip.trim();
                if !ip.is_empty() && ip != "unknown" {
                    return Some(ip.to_string());
                }
            }
        }
    }

    None
}
