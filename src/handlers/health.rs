//! Health and diagnostic handlers
//!
//! Fixed-response endpoints that never touch the upstream API

use crate::utils::error::AppError;
use axum::{http::Uri, response::Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GREETING: &str = "Hello World!";
pub const TEST_ROUTE_OUTPUT: &str = "The route is working";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Fixed-output response of `GET /test`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TestRouteResponse {
    pub output: String,
}

/// GET /
pub async fn root() -> &'static str {
    debug!("Serving root greeting");
    GREETING
}

/// GET /test
pub async fn test_route() -> Json<TestRouteResponse> {
    Json(TestRouteResponse {
        output: TEST_ROUTE_OUTPUT.to_string(),
    })
}

/// Basic health check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: get_uptime_seconds(),
    })
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Get service uptime in seconds
pub(crate) fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START_TIME: OnceLock<Instant> = OnceLock::new();

    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_greeting() {
        assert_eq!(root().await, GREETING);
    }

    #[tokio::test]
    async fn test_test_route_output() {
        let Json(body) = test_route().await;
        assert_eq!(body.output, "The route is working");
    }

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let Json(body) = health_check().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn test_uptime_calculation() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(100));
        let uptime2 = get_uptime_seconds();

        assert!(uptime2 >= uptime1);
    }
}
