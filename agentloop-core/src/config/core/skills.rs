use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Skill discovery roots
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillsConfig {
    /// Directories scanned for `SKILL.md` descriptors (plus one nested level)
    #[serde(default = "default_paths")]
    pub paths: Vec<PathBuf>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
        }
    }
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(defaults::DEFAULT_SKILLS_PATH)]
}
