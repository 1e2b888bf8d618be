//! CLI argument parsing and configuration overrides

use crate::config::api_keys::ApiKeySources;
use crate::config::loader::{AgentloopConfig, ConfigManager};
use anyhow::Result;
use clap::{Parser, ValueHint};
use std::path::PathBuf;

/// Interactive agent with skills, code execution, and memory
#[derive(Parser, Debug, Default)]
#[command(
    name = "agentloop",
    version,
    about = "Interactive agent with skills, code execution, and memory.\n\nQuick Start:\n  ollama serve && agentloop --model llama3\n  agentloop --url https://api.openai.com/v1 --model gpt-4o-mini --key sk-..."
)]
pub struct Cli {
    /// Configuration file (default: agentloop.toml, then .agentloop/, then ~/.agentloop/)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the LLM base URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Override the model name
    #[arg(long)]
    pub model: Option<String>,

    /// Override the workspace directory
    #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub workspace: Option<PathBuf>,

    /// Override the API key (or set OPENAI_API_KEY)
    #[arg(long)]
    pub key: Option<String>,

    /// Enable debug logging for agentloop
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a sample configuration file and exit
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub init_config: Option<PathBuf>,
}

impl Cli {
    /// Load the configuration file, then apply flag overrides
    pub fn load_config(&self) -> Result<AgentloopConfig> {
        let manager = match &self.config {
            Some(path) => ConfigManager::load_from_file(path)?,
            None => ConfigManager::load()?,
        };
        let mut config = manager.into_config();
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AgentloopConfig) {
        if let Some(url) = &self.url {
            config.llm.base_url = url.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(workspace) = &self.workspace {
            config.workspace = workspace.clone();
        }
    }

    /// Key sources in precedence order: `--key`, config file, environment
    pub fn api_key_sources(&self, config: &AgentloopConfig) -> ApiKeySources {
        ApiKeySources {
            cli_override: self.key.clone(),
            config_value: Some(config.llm.api_key.clone()),
            ..Default::default()
        }
    }
}
