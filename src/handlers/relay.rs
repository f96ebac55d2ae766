//! Code-assist relay handlers
//!
//! POST /generate-code, /explain-code, /debug-code and /run-code all land here

use crate::handlers::AppState;
use crate::models::relay::RouteKind;
use crate::utils::error::{AppError, AppResult};
use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle a relay request for `route`
///
/// The body is parsed leniently: an empty body, a body without an
/// `application/json` content type, or unparseable JSON behaves like `{}`
/// and is rejected by input validation.
pub async fn handle_relay(
    state: Arc<AppState>,
    route: RouteKind,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<BTreeMap<&'static str, String>>> {
    debug!("Received relay request for {}", route.path());

    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(state.settings.request.max_request_size)
        } else {
            AppError::Validation(rejection.body_text())
        }
    })?;

    let payload = if body.is_empty() {
        serde_json::Value::Null
    } else if !is_json_content_type(&headers) {
        warn!("Ignoring request body without a JSON content type for {}", route.path());
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!("Ignoring unparseable request body for {}: {}", route.path(), e);
            serde_json::Value::Null
        })
    };

    let text = state.relay.forward(route, &payload).await?;

    Ok(Json(route.spec().wrap_output(text)))
}

/// Whether the request declares `application/json`, parameters ignored
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
