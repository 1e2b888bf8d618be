use crate::config::constants::agent;
use serde::{Deserialize, Serialize};

/// Agent loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Maximum model-call/act/feedback rounds per user turn
    #[serde(default = "default_max_action_rounds")]
    pub max_action_rounds: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_action_rounds: default_max_action_rounds(),
        }
    }
}

fn default_max_action_rounds() -> usize {
    agent::MAX_ACTION_ROUNDS
}
