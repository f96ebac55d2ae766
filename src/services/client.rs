//! HTTP client service
//!
//! Encapsulates HTTP communication with the chat-completion API

use crate::config::settings::UpstreamConfig;
use crate::models::chat::{ChatErrorResponse, ChatRequest, ChatResponse};
use crate::utils::error::{AppError, AppResult, ErrorContext};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error};

/// Upstream chat-completion provider
///
/// The relay only depends on this trait, so handlers can be exercised against
/// a stub without any network access.
#[async_trait]
pub trait ChatProvider: Send + Sync + std::fmt::Debug {
    /// Send a chat completion request (non-streaming)
    async fn chat_complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;
}

/// Chat-completion client speaking the OpenAI-compatible HTTP API
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpChatClient {
    /// Create a new client instance
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("coderelay/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the request URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> AppResult<ChatResponse> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .upstream_context("Failed to read response body")?;
            let chat_response: ChatResponse =
                serde_json::from_str(&body).malformed_context("Failed to parse response")?;

            debug!("Chat completion request completed successfully");
            Ok(chat_response)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as OpenAI error format
            let detail = match serde_json::from_str::<ChatErrorResponse>(&error_text) {
                Ok(error_response) => error_response.error.message,
                Err(_) => error_text,
            };
            error!("Chat completion request failed: {} - {}", status, detail);
            Err(AppError::Upstream(format!(
                "Request failed with status code {}: {}",
                status.as_u16(),
                detail
            )))
        }
    }
}

#[async_trait]
impl ChatProvider for HttpChatClient {
    async fn chat_complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        debug!("Sending chat completion request for model: {}", request.model);

        let response = self
            .client
            .post(self.completions_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .upstream_context("Failed to send request")?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            api_key: "gsk_test".to_string(),
            base_url: base_url.to_string(),
            timeout: None,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = HttpChatClient::new(&upstream("https://api.groq.com/openai/v1"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_completions_url_strips_trailing_slash() {
        let client = HttpChatClient::new(&upstream("http://localhost:9000/v1/")).unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_client_with_timeout() {
        let mut config = upstream("http://localhost:9000");
        config.timeout = Some(5);
        assert!(HttpChatClient::new(&config).is_ok());
    }
}
