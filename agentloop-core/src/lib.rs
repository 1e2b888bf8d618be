//! # agentloop-core - Runtime for agentloop
//!
//! `agentloop-core` drives a multi-round conversation with a language model
//! and lets the model act through small text markers embedded in its replies:
//! fenced `run` blocks execute code in a workspace, `[MEMORY ...]` markers
//! read and write a persistent key/value store, and `[SKILL LOAD ...]` pulls
//! reusable instruction sets into the conversation on demand.
//!
//! ## Architecture Overview
//!
//! - `core/agent`: action grammar, system prompt assembly, and the turn loop
//!   ([`Agent`]), capped at `max_action_rounds` rounds per user turn.
//! - `core/memory`: the conversation window with model-assisted summarization
//!   and the write-through long-term store ([`Memory`]).
//! - `skills`: `SKILL.md` discovery and lazy loading ([`SkillLoader`]).
//! - `code_runner`: workspace-pinned subprocess execution ([`CodeRunner`]).
//! - `llm`: the [`LLMProvider`] trait and an OpenAI-compatible client.
//! - `config`: `agentloop.toml` loading, defaults, and API key resolution.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use agentloop_core::{Agent, AgentOptions, ConfigManager, create_provider_with_config};
//! use agentloop_core::config::api_keys::ApiKeySources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigManager::load()?.into_config();
//!     let provider = create_provider_with_config(&config.llm, ApiKeySources::default());
//!     let mut agent = Agent::new(provider, AgentOptions::from_config(&config))?;
//!
//!     let reply = agent.chat("What is 2 + 2? Compute it.").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod code_runner;
pub mod config;
pub mod core;
pub mod llm;
pub mod skills;

pub use code_runner::{CodeRunner, RunFailure, RunResult};
pub use config::{AgentloopConfig, ConfigManager};
pub use self::core::agent::{Agent, AgentOptions};
pub use self::core::memory::{Memory, MemoryValue};
pub use llm::{LLMError, LLMProvider, create_provider_with_config};
pub use skills::{Skill, SkillLoader};
