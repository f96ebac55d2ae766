//! Middleware tests

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use coderelay::config::settings::{
    LoggingConfig, RequestConfig, RouteModels, SecurityConfig, ServerConfig, Settings,
    UpstreamConfig,
};
use coderelay::handlers::create_router;
use coderelay::middleware::logging::{get_client_ip, REQUEST_ID_HEADER};
use tower::ServiceExt;

fn create_test_settings(security: SecurityConfig) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        upstream: UpstreamConfig {
            api_key: "gsk_middleware_test".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: None,
        },
        models: RouteModels::default(),
        request: RequestConfig {
            max_request_size: 1024,
        },
        security,
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

fn permissive() -> SecurityConfig {
    SecurityConfig {
        allowed_origins: vec!["*".to_string()],
        cors_enabled: true,
    }
}

#[tokio::test]
async fn test_request_id_header_added() {
    let app = create_router(create_test_settings(permissive())).unwrap();

    let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_request_ids_are_unique() {
    let app = create_router(create_test_settings(permissive())).unwrap();

    let first = app
        .clone()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_ne!(
        first.headers().get(REQUEST_ID_HEADER),
        second.headers().get(REQUEST_ID_HEADER)
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = create_router(create_test_settings(permissive())).unwrap();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/generate-code")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_origin_list() {
    let app = create_router(create_test_settings(SecurityConfig {
        allowed_origins: vec!["https://app.example.com".to_string()],
        cors_enabled: true,
    }))
    .unwrap();

    let request = Request::builder()
        .uri("/test")
        .header("origin", "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://app.example.com"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let app = create_router(create_test_settings(SecurityConfig {
        allowed_origins: vec!["*".to_string()],
        cors_enabled: false,
    }))
    .unwrap();

    let request = Request::builder()
        .uri("/test")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[test]
fn test_invalid_cors_origin_fails_router_creation() {
    let result = create_router(create_test_settings(SecurityConfig {
        allowed_origins: vec!["bad\norigin".to_string()],
        cors_enabled: true,
    }));

    assert!(result.is_err());
}

#[test]
fn test_get_client_ip_priority() {
    let mut headers = HeaderMap::new();
    headers.insert("x-real-ip", "10.0.0.2".parse().unwrap());
    headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());

    assert_eq!(get_client_ip(&headers), Some("203.0.113.7".to_string()));

    headers.clear();
    headers.insert("x-forwarded-for", "unknown".parse().unwrap());
    assert_eq!(get_client_ip(&headers), None);
}
