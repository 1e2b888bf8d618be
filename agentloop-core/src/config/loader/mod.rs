use crate::config::constants::{config_files, defaults};
use crate::config::core::{AgentConfig, LlmConfig, MemoryConfig, RunnerConfig, SkillsConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for agentloop
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentloopConfig {
    /// Directory that scopes code execution and the long-term store
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Model endpoint settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Skill discovery roots
    #[serde(default)]
    pub skills: SkillsConfig,

    /// Conversation window sizing
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Code execution settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_workspace() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_WORKSPACE)
}

impl Default for AgentloopConfig {
    fn default() -> Self {
        Self {
            workspace: default_workspace(),
            llm: LlmConfig::default(),
            skills: SkillsConfig::default(),
            memory: MemoryConfig::default(),
            runner: RunnerConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl AgentloopConfig {
    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let default_config = AgentloopConfig::default();
        let config_content = toml::to_string_pretty(&default_config)
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for loading configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AgentloopConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Get the user's home directory path
    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        // Try agentloop.toml in workspace root first
        let config_path = workspace.join(config_files::FILE_NAME);
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }

        // Try .agentloop/agentloop.toml in workspace
        let fallback_path = workspace
            .join(config_files::DOT_DIR)
            .join(config_files::FILE_NAME);
        if fallback_path.exists() {
            return Self::load_from_file(&fallback_path);
        }

        // Try ~/.agentloop/agentloop.toml in user home directory
        if let Some(home_dir) = Self::get_home_dir() {
            let home_config_path = home_dir
                .join(config_files::DOT_DIR)
                .join(config_files::FILE_NAME);
            if home_config_path.exists() {
                return Self::load_from_file(&home_config_path);
            }
        }

        Ok(Self {
            config: AgentloopConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AgentloopConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &AgentloopConfig {
        &self.config
    }

    /// Consume the manager, keeping only the configuration
    pub fn into_config(self) -> AgentloopConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
