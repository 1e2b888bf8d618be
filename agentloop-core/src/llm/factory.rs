use crate::config::api_keys::{ApiKeySources, resolve_api_key};
use crate::config::core::LlmConfig;
use crate::llm::provider::LLMProvider;
use crate::llm::providers::OpenAIProvider;

/// Create the chat-completion provider described by the `[llm]` section
///
/// The key is resolved from `sources`, with the config value filled in from
/// `config.api_key` when the caller left it unset.
pub fn create_provider_with_config(
    config: &LlmConfig,
    mut sources: ApiKeySources,
) -> Box<dyn LLMProvider> {
    if sources.config_value.is_none() {
        sources.config_value = Some(config.api_key.clone());
    }
    let api_key = resolve_api_key(&sources);
    Box::new(OpenAIProvider::from_config(config, api_key))
}
