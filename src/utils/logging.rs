//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::config::settings::LoggingConfig;
use crate::models::chat::ChatRequest;

/// Set to true to include full prompts in debug logs
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Maximum prompt characters kept in a log summary
const MAX_LOGGED_CONTENT: usize = 200;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let dropped = s[cut..].chars().count();
            format!("{}... ({} chars truncated)", &s[..cut], dropped)
        }
        None => s.to_string(),
    }
}

/// Create a filtered summary of a chat request for logging
pub fn create_request_log_summary(request: &ChatRequest) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        return serde_json::to_value(request)
            .unwrap_or(serde_json::json!({"error": "serialize failed"}));
    }

    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|msg| {
            serde_json::json!({
                "role": msg.role,
                "content": truncate_content(&msg.content, MAX_LOGGED_CONTENT),
            })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "messages": messages,
    })
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` directives take precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}
