#![allow(dead_code)]

use agentloop_core::config::core::RunnerConfig;
use agentloop_core::llm::provider::{FinishReason, LLMRequest, LLMResponse};
use agentloop_core::{AgentOptions, LLMError, LLMProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Replays canned replies in order and records every request it receives
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Arc<Mutex<Vec<LLMRequest>>>,
    fallback: String,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> (Self, Arc<Mutex<Vec<LLMRequest>>>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn with_results<I>(replies: I) -> (Self, Arc<Mutex<Vec<LLMRequest>>>)
    where
        I: IntoIterator<Item = Result<String, String>>,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Arc::clone(&requests),
            fallback: "done".to_string(),
        };
        (provider, requests)
    }

    /// Reply used once the script runs out
    pub fn repeating(reply: &str) -> (Self, Arc<Mutex<Vec<LLMRequest>>>) {
        let (mut provider, requests) = Self::new(Vec::<String>::new());
        provider.fallback = reply.to_string();
        (provider, requests)
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.requests.lock().unwrap().push(request);
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()));

        match next {
            Ok(text) => Ok(LLMResponse {
                content: Some(text),
                usage: None,
                finish_reason: FinishReason::Stop,
            }),
            Err(message) => Err(LLMError::Network(message)),
        }
    }
}

/// Agent options over `workspace` that execute code with `sh`
pub fn sh_options(workspace: &Path) -> AgentOptions {
    let mut options = AgentOptions::new(workspace);
    options.runner = RunnerConfig {
        interpreter: "sh".to_string(),
        timeout_secs: 10,
    };
    options
}

pub fn write_skill(root: &Path, dir: &str, text: &str) {
    let dir = root.join(dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("SKILL.md"), text).unwrap();
}
