//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod relay;

use crate::config::settings::{SecurityConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::models::relay::RouteKind;
use crate::services::{ChatProvider, HttpChatClient, RelayService};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderMap, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub relay: RelayService,
}

/// Create application router backed by the HTTP chat-completion client
pub fn create_router(settings: Settings) -> Result<Router> {
    let client = HttpChatClient::new(&settings.upstream)?;
    create_router_with_provider(settings, Arc::new(client))
}

/// Create application router with an explicit upstream provider
pub fn create_router_with_provider(
    settings: Settings,
    provider: Arc<dyn ChatProvider>,
) -> Result<Router> {
    let cors = if settings.security.cors_enabled {
        Some(build_cors_layer(&settings.security)?)
    } else {
        None
    };

    // Start the uptime clock
    health::get_uptime_seconds();

    let app_state = Arc::new(AppState {
        relay: RelayService::new(provider, settings.models.clone()),
        settings: settings.clone(),
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware));

    let mut router = Router::new()
        .route("/", get(health::root))
        .route("/test", get(health::test_route))
        .route("/health", get(health::health_check));

    for route in RouteKind::ALL {
        router = router.route(
            route.path(),
            post(
                move |State(state): State<Arc<AppState>>,
                      headers: HeaderMap,
                      body: Result<Bytes, BytesRejection>| {
                    relay::handle_relay(state, route, headers, body)
                },
            ),
        );
    }

    let mut router = router
        .fallback(health::not_found)
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(settings.request.max_request_size));

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    let router = router.layer(middleware_stack);

    Ok(router)
}

/// Build the CORS layer, `*` allows any origin
fn build_cors_layer(security: &SecurityConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if security.allowed_origins.is_empty() || security.allowed_origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = security
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}
