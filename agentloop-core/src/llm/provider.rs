//! Chat-completion provider abstraction
//!
//! The agent loop only needs one operation from a model: given an ordered list
//! of `{role, content}` messages and sampling parameters, return reply text.
//! [`LLMProvider`] captures that boundary so the runtime can be driven by the
//! HTTP client in production and by scripted doubles in tests.
//!
//! ```rust
//! use agentloop_core::llm::provider::{Message, MessageRole};
//!
//! let msg = Message::user("add 2+2");
//! assert_eq!(msg.role, MessageRole::User);
//! assert_eq!(msg.role.as_str(), "user");
//! ```

use crate::config::constants::message_roles;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal LLM request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// One conversation entry. Immutable once appended to a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Role string for OpenAI-compatible APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => message_roles::SYSTEM,
            MessageRole::User => message_roles::USER,
            MessageRole::Assistant => message_roles::ASSISTANT,
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Universal LLM response
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: Option<String>,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

impl LLMResponse {
    /// Reply text, treating a missing content field as an empty reply
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error(String),
}

/// Universal LLM provider trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "openai")
    fn name(&self) -> &str;

    /// Model identifier requests are sent with
    fn model(&self) -> &str;

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Messages cannot be empty".to_string(),
            ));
        }

        if request.model.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Model cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl LLMProvider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
            Ok(LLMResponse {
                content: request.messages.last().map(|m| m.content.clone()),
                usage: None,
                finish_reason: FinishReason::Stop,
            })
        }
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn default_validation_rejects_empty_messages_and_model() {
        let empty = LLMRequest {
            messages: vec![],
            model: "m".to_string(),
            temperature: None,
            max_tokens: None,
        };
        assert!(matches!(
            Echo.validate_request(&empty),
            Err(LLMError::InvalidRequest(_))
        ));

        let no_model = LLMRequest {
            messages: vec![Message::user("x")],
            model: String::new(),
            temperature: None,
            max_tokens: None,
        };
        assert!(Echo.validate_request(&no_model).is_err());
    }

    #[test]
    fn missing_content_reads_as_empty_text() {
        let response = LLMResponse {
            content: None,
            usage: None,
            finish_reason: FinishReason::Length,
        };
        assert_eq!(response.text(), "");
    }
}
