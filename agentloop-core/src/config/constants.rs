/// Default values shared by the configuration loader and the CLI
pub mod defaults {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
    pub const DEFAULT_MODEL: &str = "llama3";
    pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const DEFAULT_WORKSPACE: &str = "./workspace";
    pub const DEFAULT_SKILLS_PATH: &str = "./skills/";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
}

/// Config file names and lookup locations
pub mod config_files {
    pub const FILE_NAME: &str = "agentloop.toml";
    pub const DOT_DIR: &str = ".agentloop";
}

/// Agent loop constants
pub mod agent {
    /// Upper bound on model-call/act/feedback iterations per turn
    pub const MAX_ACTION_ROUNDS: usize = 5;
    /// Temperature used for the history summarization call
    pub const SUMMARY_TEMPERATURE: f32 = 0.0;
}

/// Conversation window and long-term store constants
pub mod memory {
    pub const STORE_FILE: &str = "_memory.json";
    pub const DEFAULT_MAX_SHORT_TERM: usize = 20;
    pub const DEFAULT_SUMMARY_THRESHOLD: usize = 15;
    pub const SUMMARY_HEADER: &str = "[Previous conversation summary]";
}

/// Code execution constants
pub mod runner {
    pub const DEFAULT_INTERPRETER: &str = "python3";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Reserved temp script name, reused across `run` calls
    pub const EXEC_SCRIPT: &str = "_exec.py";
    /// Environment variable exposing the absolute workspace path to executed code
    pub const WORKSPACE_ENV: &str = "AGENT_WORKSPACE";
    /// Exit code used for every failure that never produced a real process status
    pub const FAILURE_EXIT_CODE: i32 = -1;
}

/// Skill discovery constants
pub mod skills {
    pub const DESCRIPTOR_FILE: &str = "SKILL.md";
}

/// Message role strings used on the wire
pub mod message_roles {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
}
