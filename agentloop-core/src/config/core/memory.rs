use crate::config::constants::memory;
use serde::{Deserialize, Serialize};

/// Conversation window sizing
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Window size the summary tail is computed against
    #[serde(default = "default_max_short_term")]
    pub max_short_term: usize,

    /// Window length at which the next turn triggers summarization
    #[serde(default = "default_summary_threshold")]
    pub summary_threshold: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_short_term: default_max_short_term(),
            summary_threshold: default_summary_threshold(),
        }
    }
}

fn default_max_short_term() -> usize {
    memory::DEFAULT_MAX_SHORT_TERM
}
fn default_summary_threshold() -> usize {
    memory::DEFAULT_SUMMARY_THRESHOLD
}
