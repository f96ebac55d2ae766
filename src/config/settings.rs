//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use crate::models::relay::RouteKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream chat-completion API configuration
    pub upstream: UpstreamConfig,
    /// Model identifier used by each relay route
    pub models: RouteModels,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream chat-completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Bearer credential
    pub api_key: String,
    /// API base URL, `/chat/completions` is appended
    pub base_url: String,
    /// Request timeout in seconds, `None` waits indefinitely
    pub timeout: Option<u64>,
}

/// Per-route model identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteModels {
    pub generate_code: String,
    pub explain_code: String,
    pub debug_code: String,
    pub run_code: String,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_DEBUG_MODEL: &str = "gemini-pro";

impl Default for RouteModels {
    fn default() -> Self {
        Self {
            generate_code: DEFAULT_MODEL.to_string(),
            explain_code: DEFAULT_MODEL.to_string(),
            debug_code: DEFAULT_DEBUG_MODEL.to_string(),
            run_code: DEFAULT_MODEL.to_string(),
        }
    }
}

impl RouteModels {
    /// Model identifier configured for a route
    pub fn model_for(&self, route: RouteKind) -> &str {
        match route {
            RouteKind::GenerateCode => &self.generate_code,
            RouteKind::ExplainCode => &self.explain_code,
            RouteKind::DebugCode => &self.debug_code,
            RouteKind::RunCode => &self.run_code,
        }
    }
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// `new()` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = RouteModels::default();

        let timeout = match lookup("UPSTREAM_TIMEOUT") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("Invalid upstream timeout value")?,
            ),
            _ => None,
        };

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: get("PORT", "3000")
                    .parse()
                    .context("Invalid port number")?,
            },
            upstream: UpstreamConfig {
                api_key: lookup("GROQ_API_KEY")
                    .context("GROQ_API_KEY environment variable not set")?,
                base_url: get("UPSTREAM_BASE_URL", DEFAULT_BASE_URL),
                timeout,
            },
            models: RouteModels {
                generate_code: get("GENERATE_CODE_MODEL", &defaults.generate_code),
                explain_code: get("EXPLAIN_CODE_MODEL", &defaults.explain_code),
                debug_code: get("DEBUG_CODE_MODEL", &defaults.debug_code),
                run_code: get("RUN_CODE_MODEL", &defaults.run_code),
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.upstream.api_key.is_empty() {
            anyhow::bail!("Upstream API key cannot be empty");
        }

        if self.upstream.api_key.contains(char::is_whitespace) {
            anyhow::bail!("Upstream API key cannot contain whitespace characters");
        }

        if !self.upstream.base_url.starts_with("http") {
            anyhow::bail!("Invalid upstream base URL format, should start with 'http'");
        }

        if self.upstream.timeout == Some(0) {
            anyhow::bail!("Upstream timeout cannot be 0");
        }

        for route in RouteKind::ALL {
            if self.models.model_for(route).trim().is_empty() {
                anyhow::bail!("Model identifier for {} cannot be empty", route.path());
            }
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Same directive syntax as RUST_LOG, e.g. `coderelay=debug,tower_http=info`
        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log filter: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
