//! Action grammar embedded in model replies
//!
//! ~~~text
//! [MEMORY SET key=value]    [MEMORY GET key]    [MEMORY DEL key]
//! [MEMORY LIST]             [SKILL LOAD name]
//!
//! ```run
//! print("hello")
//! ```
//! ~~~
//!
//! [`extract_actions`] returns actions grouped by kind in a fixed order
//! (SET, GET, DEL, LIST, SKILL LOAD, run blocks), each group in left-to-right
//! order. Text position across kinds does not matter: a GET written before a
//! SET for the same key still observes the new value.

use once_cell::sync::Lazy;
use regex::Regex;

const MEMORY_LIST_MARKER: &str = "[MEMORY LIST]";

#[allow(clippy::expect_used)]
static MEMORY_SET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[MEMORY SET\s+(\S+?)=(.+?)\]").expect("valid pattern"));
#[allow(clippy::expect_used)]
static MEMORY_GET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[MEMORY GET\s+(\S+)\]").expect("valid pattern"));
#[allow(clippy::expect_used)]
static MEMORY_DEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[MEMORY DEL\s+(\S+)\]").expect("valid pattern"));
#[allow(clippy::expect_used)]
static SKILL_LOAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[SKILL LOAD\s+(\S+)\]").expect("valid pattern"));
#[allow(clippy::expect_used)]
static RUN_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```run\s*\n(.*?)```").expect("valid pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MemorySet { key: String, value: String },
    MemoryGet { key: String },
    MemoryDel { key: String },
    MemoryList,
    SkillLoad { name: String },
    /// Code with surrounding whitespace stripped
    RunCode { code: String },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::MemorySet { .. } => "memory_set",
            Action::MemoryGet { .. } => "memory_get",
            Action::MemoryDel { .. } => "memory_del",
            Action::MemoryList => "memory_list",
            Action::SkillLoad { .. } => "skill_load",
            Action::RunCode { .. } => "run_code",
        }
    }
}

/// Extract every action in `reply`, in execution order
pub fn extract_actions(reply: &str) -> Vec<Action> {
    let mut actions = Vec::new();

    for caps in MEMORY_SET_RE.captures_iter(reply) {
        actions.push(Action::MemorySet {
            key: caps[1].to_string(),
            value: caps[2].to_string(),
        });
    }
    for caps in MEMORY_GET_RE.captures_iter(reply) {
        actions.push(Action::MemoryGet {
            key: caps[1].to_string(),
        });
    }
    for caps in MEMORY_DEL_RE.captures_iter(reply) {
        actions.push(Action::MemoryDel {
            key: caps[1].to_string(),
        });
    }
    if reply.contains(MEMORY_LIST_MARKER) {
        actions.push(Action::MemoryList);
    }
    for caps in SKILL_LOAD_RE.captures_iter(reply) {
        actions.push(Action::SkillLoad {
            name: caps[1].to_string(),
        });
    }
    for caps in RUN_BLOCK_RE.captures_iter(reply) {
        actions.push(Action::RunCode {
            code: caps[1].trim().to_string(),
        });
    }

    actions
}
