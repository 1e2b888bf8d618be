use crate::config::constants::defaults;
use crate::config::core::LlmConfig;
use crate::llm::error_display;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Message, Usage,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const PROVIDER_NAME: &str = "openai";

/// Client for any OpenAI-compatible `/v1/chat/completions` endpoint
/// (OpenAI itself, Ollama, LM Studio, vLLM, ...)
pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(
            base_url,
            api_key,
            model,
            Duration::from_secs(defaults::DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self {
            api_key: api_key.into(),
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Build a provider from the `[llm]` config section and a resolved key
    pub fn from_config(config: &LlmConfig, api_key: impl Into<String>) -> Self {
        Self::with_timeout(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let payload = convert_to_openai_format(&request);
        let url = self.endpoint();
        debug!(url = %url, messages = request.messages.len(), "sending chat completion");

        let mut builder = self.http_client.post(&url).json(&payload);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                PROVIDER_NAME,
                &format!("Could not reach {}: {}", self.base_url, e),
            );
            LLMError::Network(formatted_error)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let formatted_error = error_display::format_llm_error(
                PROVIDER_NAME,
                &format!("LLM request failed ({}): {}", status.as_u16(), error_text),
            );
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LLMError::Authentication(formatted_error)
                }
                _ => LLMError::Provider(formatted_error),
            });
        }

        let openai_response: Value = response.json().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                PROVIDER_NAME,
                &format!("Failed to parse response: {e}"),
            );
            LLMError::Provider(formatted_error)
        })?;

        parse_openai_response(openai_response)
    }
}

fn convert_to_openai_format(request: &LLMRequest) -> Value {
    let messages: Vec<Value> = request.messages.iter().map(message_to_json).collect();

    let mut openai_request = json!({
        "model": request.model,
        "messages": messages,
    });

    if let Some(temperature) = request.temperature {
        openai_request["temperature"] = json!(temperature);
    }

    if let Some(max_tokens) = request.max_tokens {
        openai_request["max_tokens"] = json!(max_tokens);
    }

    openai_request
}

fn message_to_json(message: &Message) -> Value {
    json!({
        "role": message.role.as_str(),
        "content": message.content,
    })
}

fn parse_openai_response(response_json: Value) -> Result<LLMResponse, LLMError> {
    let choice = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .ok_or_else(|| LLMError::Provider("Invalid response format: missing choices".to_string()))?;

    let message = choice.get("message").ok_or_else(|| {
        LLMError::Provider("Invalid response format: missing message".to_string())
    })?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string());

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|fr| fr.as_str())
        .map(|fr| match fr {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Error(fr.to_string()),
        })
        .unwrap_or(FinishReason::Stop);

    let usage = response_json.get("usage").map(|u| {
        let count = |field: &str| u.get(field).and_then(|v| v.as_u64()).unwrap_or(0) as u32;
        Usage {
            prompt_tokens: count("prompt_tokens"),
            completion_tokens: count("completion_tokens"),
            total_tokens: count("total_tokens"),
        }
    });

    Ok(LLMResponse {
        content,
        usage,
        finish_reason,
    })
}
