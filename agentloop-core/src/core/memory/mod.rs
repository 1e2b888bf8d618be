//! Two-tier agent memory
//!
//! The short-term tier is the conversation window that is sent to the model
//! on every round. Once it reaches `summary_threshold` messages the agent asks
//! the model for a summary and the window collapses to that summary plus a
//! short tail of recent messages.
//!
//! The long-term tier is a small key/value store of scalars persisted to
//! `<workspace>/_memory.json`. It is written through on every mutation and
//! survives restarts. A corrupt file is treated as empty.

mod store;
mod window;

pub use store::{LongTermStore, MemoryValue};
pub use window::ConversationWindow;

use crate::config::core::MemoryConfig;
use crate::llm::provider::{Message, MessageRole};
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug)]
pub struct Memory {
    window: ConversationWindow,
    store: LongTermStore,
}

impl Memory {
    /// Open memory over `workspace`, creating the directory if needed
    pub fn open(workspace: impl AsRef<Path>, config: MemoryConfig) -> Result<Self> {
        let workspace = workspace.as_ref();
        std::fs::create_dir_all(workspace)
            .with_context(|| format!("Failed to create workspace: {}", workspace.display()))?;

        Ok(Self {
            store: LongTermStore::open(workspace),
            window: ConversationWindow::new(config),
        })
    }

    // short-term

    pub fn add_message(&mut self, role: MessageRole, content: impl Into<String>) {
        self.window.push(Message::new(role, content));
    }

    pub fn messages(&self) -> &[Message] {
        self.window.messages()
    }

    pub fn needs_summarization(&self) -> bool {
        self.window.needs_summarization()
    }

    pub fn summarization_prompt(&self) -> String {
        self.window.summarization_prompt()
    }

    pub fn apply_summary(&mut self, summary: &str) {
        self.window.apply_summary(summary);
    }

    /// Empty the window; the long-term store is untouched
    pub fn clear(&mut self) {
        self.window.clear();
    }

    // long-term

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MemoryValue>) -> Result<()> {
        self.store.set(key, value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MemoryValue> {
        self.store.get(key)
    }

    /// Like [`Memory::get`], falling back to `default` when the key is absent
    pub fn get_or(&self, key: &str, default: MemoryValue) -> MemoryValue {
        self.store.get(key).cloned().unwrap_or(default)
    }

    pub fn delete(&mut self, key: &str) -> Result<bool> {
        self.store.delete(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    pub fn long_term(&self) -> &LongTermStore {
        &self.store
    }
}
