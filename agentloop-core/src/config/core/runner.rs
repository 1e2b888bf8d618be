use crate::config::constants::runner;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Code execution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Program used to execute workspace scripts
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Default execution timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RunnerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_interpreter() -> String {
    runner::DEFAULT_INTERPRETER.to_string()
}
fn default_timeout_secs() -> u64 {
    runner::DEFAULT_TIMEOUT_SECS
}
