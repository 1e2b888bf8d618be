use crate::config::constants::memory;
use crate::config::core::MemoryConfig;
use crate::llm::provider::{Message, MessageRole};

const SUMMARY_INSTRUCTION: &str = "Summarize the following conversation. Preserve every key decision, \
fact, file path, and pending action item. Be concise.";

/// Ordered short-term conversation, compressed by summarization
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    messages: Vec<Message>,
    config: MemoryConfig,
}

impl ConversationWindow {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            messages: Vec::new(),
            config,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn needs_summarization(&self) -> bool {
        self.messages.len() >= self.config.summary_threshold
    }

    pub fn summarization_prompt(&self) -> String {
        let transcript = self
            .messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str().to_uppercase(), m.content))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{SUMMARY_INSTRUCTION}\n\n{transcript}")
    }

    /// Replace the window with a summary message plus the most recent tail
    pub fn apply_summary(&mut self, summary: &str) {
        let keep = self
            .config
            .max_short_term
            .saturating_sub(self.config.summary_threshold)
            .min(self.messages.len());
        let tail = self.messages.split_off(self.messages.len() - keep);

        self.messages.clear();
        self.messages.push(Message::new(
            MessageRole::System,
            format!("{}\n{}", memory::SUMMARY_HEADER, summary),
        ));
        self.messages.extend(tail);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
