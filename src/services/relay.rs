//! Relay service
//!
//! Validates the route's input, sends one chat completion upstream and
//! reshapes the reply.

use crate::config::settings::RouteModels;
use crate::models::chat::ChatRequest;
use crate::models::relay::{PostProcess, RouteKind};
use crate::services::client::ChatProvider;
use crate::services::markdown::markdown_to_html;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_request_log_summary;
use std::sync::Arc;
use tracing::debug;

/// Forwards code-assist requests to the chat-completion provider
#[derive(Debug, Clone)]
pub struct RelayService {
    provider: Arc<dyn ChatProvider>,
    models: RouteModels,
}

impl RelayService {
    pub fn new(provider: Arc<dyn ChatProvider>, models: RouteModels) -> Self {
        Self { provider, models }
    }

    /// Build the upstream request for a route and its user text
    pub fn build_request(&self, route: RouteKind, input: &str) -> ChatRequest {
        let prompt = route.spec().render_prompt(input);
        ChatRequest::single_user_message(prompt, self.models.model_for(route))
    }

    /// Run one relay round trip for `route` with the inbound JSON body
    ///
    /// Returns the (possibly post-processed) model text. A missing or empty
    /// input field fails before anything is sent upstream.
    pub async fn forward(&self, route: RouteKind, body: &serde_json::Value) -> AppResult<String> {
        let spec = route.spec();
        let input = spec
            .extract_input(body)
            .ok_or_else(|| AppError::Validation(spec.missing_input_message.to_string()))?;

        let request = self.build_request(route, input);
        if let Ok(summary_json) = serde_json::to_string(&create_request_log_summary(&request)) {
            debug!("Upstream request for {}: {}", spec.path, summary_json);
        }

        let response = self.provider.chat_complete(&request).await?;
        let content = response.into_first_content()?;

        Ok(match spec.post_process {
            PostProcess::None => content,
            PostProcess::MarkdownToHtml => markdown_to_html(&content),
        })
    }
}
