//! LLM error display utilities
//!
//! Styled provider/error prefixes for messages that end up on the terminal.

use console::style;

/// Get a styled error message
pub fn style_llm_error(message: &str) -> String {
    style(message).red().to_string()
}

/// Get a styled provider name
pub fn style_provider_name(provider: &str) -> String {
    style(provider).cyan().to_string()
}

/// Format an LLM error for display
pub fn format_llm_error(provider: &str, error: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_error(error)
    )
}
