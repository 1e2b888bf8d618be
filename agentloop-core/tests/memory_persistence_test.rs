//! Long-term store persistence and window compaction through the public API

use agentloop_core::config::core::MemoryConfig;
use agentloop_core::llm::provider::MessageRole;
use agentloop_core::{Memory, MemoryValue};
use std::fs;
use tempfile::TempDir;

#[test]
fn values_survive_a_fresh_memory_over_the_same_workspace() {
    let temp = TempDir::new().unwrap();
    {
        let mut memory = Memory::open(temp.path(), MemoryConfig::default()).unwrap();
        memory.set("a", "1").unwrap();
        memory.set("lang", "rust").unwrap();
        memory.delete("lang").unwrap();
    }

    let memory = Memory::open(temp.path(), MemoryConfig::default()).unwrap();
    assert_eq!(memory.get("a"), Some(&MemoryValue::from("1")));
    assert_eq!(memory.get("lang"), None);
    assert_eq!(memory.keys(), vec!["a"]);
}

#[test]
fn hand_written_store_with_mixed_scalars_loads() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("_memory.json"),
        r#"{"name": "Ada", "age": 36, "admin": false, "tags": ["x"]}"#,
    )
    .unwrap();

    let memory = Memory::open(temp.path(), MemoryConfig::default()).unwrap();
    assert_eq!(memory.keys(), vec!["name", "age", "admin"]);
    assert_eq!(memory.get("age"), Some(&MemoryValue::from(36i64)));
    assert_eq!(
        memory.get("admin").map(ToString::to_string),
        Some("false".to_string())
    );
}

#[test]
fn unreadable_store_starts_empty_and_is_overwritten_on_write() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("_memory.json");
    fs::write(&store, "\u{0}\u{1} garbage").unwrap();

    let mut memory = Memory::open(temp.path(), MemoryConfig::default()).unwrap();
    assert!(memory.keys().is_empty());

    memory.set("fresh", true).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({"fresh": true}));
}

#[test]
fn summary_compaction_has_expected_length() {
    let temp = TempDir::new().unwrap();
    let config = MemoryConfig::default();
    let mut memory = Memory::open(temp.path(), config).unwrap();
    for i in 0..config.summary_threshold {
        memory.add_message(MessageRole::User, format!("m{i}"));
    }
    assert!(memory.needs_summarization());

    memory.apply_summary("s");

    let window = memory.messages();
    assert_eq!(
        window.len(),
        1 + config.max_short_term.saturating_sub(config.summary_threshold)
    );
    assert!(window[0].content.starts_with("[Previous conversation summary]"));
    assert_eq!(window.last().map(|m| m.content.as_str()), Some("m14"));
    assert!(!memory.needs_summarization());
}
