//! Agent turn loop
//!
//! One call to [`Agent::chat`] processes one user turn: optional history
//! compaction, then up to `max_action_rounds` rounds of
//! model call → action execution → feedback. A round whose reply carries no
//! actions ends the turn. Model errors abort the turn; action failures are
//! reported back to the model as feedback text instead.

use super::actions::{Action, extract_actions};
use super::prompt::build_system_prompt;
use crate::code_runner::{CodeRunner, RunResult};
use crate::config::constants::{agent, defaults};
use crate::config::core::{MemoryConfig, RunnerConfig};
use crate::config::loader::AgentloopConfig;
use crate::core::memory::Memory;
use crate::llm::provider::{LLMProvider, LLMRequest, Message, MessageRole};
use crate::skills::SkillLoader;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Construction parameters for [`Agent`]
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub workspace: PathBuf,
    pub skill_paths: Vec<PathBuf>,
    pub memory: MemoryConfig,
    pub runner: RunnerConfig,
    pub max_action_rounds: usize,
    /// Temperature for regular rounds; summarization always uses 0.0
    pub temperature: f32,
}

impl AgentOptions {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            skill_paths: Vec::new(),
            memory: MemoryConfig::default(),
            runner: RunnerConfig::default(),
            max_action_rounds: agent::MAX_ACTION_ROUNDS,
            temperature: defaults::DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config(config: &AgentloopConfig) -> Self {
        Self {
            workspace: config.workspace.clone(),
            skill_paths: config.skills.paths.clone(),
            memory: config.memory,
            runner: config.runner.clone(),
            max_action_rounds: config.agent.max_action_rounds,
            temperature: config.llm.temperature,
        }
    }
}

pub struct Agent {
    provider: Box<dyn LLMProvider>,
    skills: SkillLoader,
    runner: CodeRunner,
    memory: Memory,
    max_action_rounds: usize,
    temperature: f32,
}

impl Agent {
    /// Wire skills, code runner, and memory over one workspace
    pub fn new(provider: Box<dyn LLMProvider>, options: AgentOptions) -> Result<Self> {
        let runner = CodeRunner::with_config(&options.workspace, &options.runner)?;
        let memory = Memory::open(runner.workspace(), options.memory)?;

        Ok(Self {
            provider,
            skills: SkillLoader::new(&options.skill_paths),
            runner,
            memory,
            max_action_rounds: options.max_action_rounds.max(1),
            temperature: options.temperature,
        })
    }

    pub fn skills(&self) -> &SkillLoader {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut SkillLoader {
        &mut self.skills
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn runner(&self) -> &CodeRunner {
        &self.runner
    }

    pub fn max_action_rounds(&self) -> usize {
        self.max_action_rounds
    }

    /// Process one user turn and return the last model reply
    pub async fn chat(&mut self, user_input: &str) -> Result<String> {
        if self.memory.needs_summarization() {
            self.summarize().await?;
        }

        self.memory.add_message(MessageRole::User, user_input);

        let mut reply = String::new();
        for round in 1..=self.max_action_rounds {
            let mut messages = vec![Message::system(self.system_prompt())];
            messages.extend_from_slice(self.memory.messages());

            reply = self.complete(messages, self.temperature).await?;
            self.memory.add_message(MessageRole::Assistant, reply.as_str());

            let feedback = self.process(&reply).await?;
            if feedback.is_empty() {
                debug!(round, "reply carried no actions");
                break;
            }

            debug!(round, feedback_len = feedback.len(), "feeding action results back");
            self.memory.add_message(MessageRole::User, feedback);
        }

        Ok(reply)
    }

    /// Current system prompt: instructions, skill summary, stored keys
    pub fn system_prompt(&mut self) -> String {
        let skills = self.skills.descriptions();
        build_system_prompt(&skills, &self.memory.keys())
    }

    async fn summarize(&mut self) -> Result<()> {
        info!(
            messages = self.memory.messages().len(),
            "summarizing conversation window"
        );
        let prompt = self.memory.summarization_prompt();
        let summary = self
            .complete(vec![Message::user(prompt)], agent::SUMMARY_TEMPERATURE)
            .await?;
        self.memory.apply_summary(&summary);
        Ok(())
    }

    async fn complete(&self, messages: Vec<Message>, temperature: f32) -> Result<String> {
        let request = LLMRequest {
            messages,
            model: self.provider.model().to_string(),
            temperature: Some(temperature),
            max_tokens: None,
        };
        let response = self.provider.generate(request).await?;
        Ok(response.text().to_string())
    }

    /// Execute every action in `reply`; empty feedback means there were none
    async fn process(&mut self, reply: &str) -> Result<String> {
        let mut out = Vec::new();

        for action in extract_actions(reply) {
            debug!(kind = action.kind(), "executing action");
            let feedback = match action {
                Action::MemorySet { key, value } => {
                    self.memory.set(key.as_str(), value)?;
                    format!("[saved {key}]")
                }
                Action::MemoryGet { key } => match self.memory.get(&key) {
                    Some(value) => format!("[{key} = {value}]"),
                    None => format!("[{key} = (not set)]"),
                },
                Action::MemoryDel { key } => {
                    if self.memory.delete(&key)? {
                        format!("[deleted {key}]")
                    } else {
                        format!("[{key} not found]")
                    }
                }
                Action::MemoryList => format!("[memory keys: {:?}]", self.memory.keys()),
                Action::SkillLoad { name } => match self.skills.get(&name) {
                    Some(skill) => format!(
                        "--- Skill: {} ---\n{}\n--- end ---",
                        skill.name, skill.content
                    ),
                    None => format!(
                        "[skill '{}' not found. Available: {:?}]",
                        name,
                        self.skills.list_names()
                    ),
                },
                Action::RunCode { code } => format_run_feedback(&self.runner.run(&code, None).await),
            };
            out.push(feedback);
        }

        Ok(out.join("\n\n"))
    }
}

fn format_run_feedback(result: &RunResult) -> String {
    let mut lines = Vec::new();
    let stdout = result.stdout.trim();
    if !stdout.is_empty() {
        lines.push(stdout.to_string());
    }
    let stderr = result.stderr.trim();
    if !stderr.is_empty() {
        lines.push(format!("STDERR: {stderr}"));
    }
    if result.exit_code != 0 {
        lines.push(format!("[exit code {}]", result.exit_code));
    }

    if lines.is_empty() {
        "[code output]\n(no output)".to_string()
    } else {
        format!("[code output]\n{}", lines.join("\n"))
    }
}
