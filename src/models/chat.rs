//! Chat-completion API data models
//!
//! Defines the request sent upstream and the subset of the response the relay reads

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat-completion request structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Message list
    pub messages: Vec<ChatMessage>,
    /// Model name
    pub model: String,
}

/// Chat message structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl ChatRequest {
    /// Single user-message request for the given model
    pub fn single_user_message(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(content)],
            model: model.into(),
        }
    }
}

/// Chat-completion response structure
///
/// Every field is optional so that a structurally unexpected body still
/// deserializes; [`ChatResponse::first_content`] decides whether it is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Model used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Choice list
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Chat-completion choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChatChoiceMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Message carried by a choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Reasons a successful upstream response carries no usable text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseShapeError {
    #[error("response contains no choices")]
    NoChoices,
    #[error("first choice has no message")]
    MissingMessage,
    #[error("first choice message has no content")]
    MissingContent,
}

impl ChatResponse {
    /// Extract `choices[0].message.content`
    pub fn first_content(&self) -> Result<&str, ResponseShapeError> {
        let choice = self.choices.first().ok_or(ResponseShapeError::NoChoices)?;
        let message = choice
            .message
            .as_ref()
            .ok_or(ResponseShapeError::MissingMessage)?;
        message
            .content
            .as_deref()
            .ok_or(ResponseShapeError::MissingContent)
    }

    /// Consume the response and take ownership of the first choice's content
    pub fn into_first_content(mut self) -> Result<String, ResponseShapeError> {
        self.first_content()?;
        let mut choice = self.choices.swap_remove(0);
        choice
            .message
            .take()
            .and_then(|m| m.content)
            .ok_or(ResponseShapeError::MissingContent)
    }
}

/// Upstream error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatErrorResponse {
    pub error: ChatErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatErrorDetail {
    pub message: String,
}
