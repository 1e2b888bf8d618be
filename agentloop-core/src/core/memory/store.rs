use crate::config::constants::memory;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scalar value held in the long-term store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl MemoryValue {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Number(n) => Some(Self::Number(n)),
            Value::String(s) => Some(Self::Text(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for MemoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MemoryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MemoryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for MemoryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MemoryValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Persistent key/value store, rewritten in full on every mutation
#[derive(Debug)]
pub struct LongTermStore {
    path: PathBuf,
    entries: IndexMap<String, MemoryValue>,
}

impl LongTermStore {
    /// Load `<workspace>/_memory.json`; a missing or corrupt file yields an empty store
    pub fn open(workspace: &Path) -> Self {
        let path = workspace.join(memory::STORE_FILE);
        let entries = load_entries(&path);
        debug!(path = %path.display(), keys = entries.len(), "loaded long-term store");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&mut self, key: impl Into<String>, value: MemoryValue) -> Result<()> {
        self.entries.insert(key.into(), value);
        self.save()
    }

    pub fn get(&self, key: &str) -> Option<&MemoryValue> {
        self.entries.get(key)
    }

    /// Remove `key`; returns whether it existed. Only writes when something changed.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        if self.entries.shift_remove(key).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MemoryValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize long-term store")?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create memory directory: {}", parent.display())
            })?;
        }
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write memory store: {}", self.path.display()))
    }
}

fn load_entries(path: &Path) -> IndexMap<String, MemoryValue> {
    if !path.is_file() {
        return IndexMap::new();
    }

    let raw: IndexMap<String, Value> = match fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|data| serde_json::from_str(&data).map_err(anyhow::Error::from))
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "memory store unreadable, starting empty");
            return IndexMap::new();
        }
    };

    raw.into_iter()
        .filter_map(|(key, value)| match MemoryValue::from_json(value) {
            Some(value) => Some((key, value)),
            None => {
                warn!(key = %key, "dropping non-scalar memory value");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_round_trip_through_disk() {
        let temp = TempDir::new().unwrap();
        let mut store = LongTermStore::open(temp.path());
        store.set("name", "Ada".into()).unwrap();
        store.set("count", 3i64.into()).unwrap();
        store.set("done", true.into()).unwrap();

        let reopened = LongTermStore::open(temp.path());
        assert_eq!(reopened.keys(), vec!["name", "count", "done"]);
        assert_eq!(reopened.get("name"), Some(&MemoryValue::from("Ada")));
        assert_eq!(reopened.get("count").map(ToString::to_string), Some("3".into()));
        assert_eq!(reopened.get("done"), Some(&MemoryValue::Bool(true)));
    }

    #[test]
    fn corrupt_file_yields_empty_store() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(memory::STORE_FILE), "{not json").unwrap();

        let store = LongTermStore::open(temp.path());
        assert!(store.is_empty());
    }

    #[test]
    fn non_scalar_values_are_dropped_on_load() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(memory::STORE_FILE),
            r#"{"keep": "yes", "list": [1, 2], "nested": {"a": 1}, "nothing": null, "n": 1.5}"#,
        )
        .unwrap();

        let store = LongTermStore::open(temp.path());
        assert_eq!(store.keys(), vec!["keep", "n"]);
        assert_eq!(store.get("n").map(ToString::to_string), Some("1.5".into()));
    }

    #[test]
    fn delete_reports_presence_and_persists() {
        let temp = TempDir::new().unwrap();
        let mut store = LongTermStore::open(temp.path());
        store.set("a", "1".into()).unwrap();
        store.set("b", "2".into()).unwrap();

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());

        let reopened = LongTermStore::open(temp.path());
        assert_eq!(reopened.keys(), vec!["b"]);
    }

    #[test]
    fn file_is_a_plain_json_object() {
        let temp = TempDir::new().unwrap();
        let mut store = LongTermStore::open(temp.path());
        store.set("x", "5".into()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({"x": "5"}));
    }
}
