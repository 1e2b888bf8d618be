//! # LLM Integration Layer
//!
//! A single OpenAI-compatible chat-completions client behind the
//! [`provider::LLMProvider`] trait. The agent loop depends only on the trait,
//! so any endpoint speaking the `/v1/chat/completions` dialect works, and
//! tests substitute scripted providers.
//!
//! ## Error Handling
//!
//! Failures are reported as [`provider::LLMError`] and are fatal for the turn
//! that issued the request; nothing in this layer retries.

pub mod error_display;
pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::create_provider_with_config;
pub use provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, Message, MessageRole};
pub use providers::OpenAIProvider;
