//! agentloop configuration module
//!
//! Loads `agentloop.toml` into typed sections. Every field has a serde default,
//! so a partial file (or none at all) yields a working configuration.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use self::core::{AgentConfig, LlmConfig, MemoryConfig, RunnerConfig, SkillsConfig};
pub use loader::{AgentloopConfig, ConfigManager};
