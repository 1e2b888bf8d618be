pub mod agent;
pub mod llm;
pub mod memory;
pub mod runner;
pub mod skills;

pub use agent::AgentConfig;
pub use llm::LlmConfig;
pub use memory::MemoryConfig;
pub use runner::RunnerConfig;
pub use skills::SkillsConfig;
