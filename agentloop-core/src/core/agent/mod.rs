//! Agent orchestration: action grammar, system prompt, and the turn loop

pub mod actions;
pub mod prompt;
pub mod runner;

pub use actions::{Action, extract_actions};
pub use runner::{Agent, AgentOptions};
