//! `SKILL.md` descriptor parsing
//!
//! A descriptor is markdown with an optional leading block of flat
//! `key: value` lines between two `---` lines:
//!
//! ```text
//! ---
//! name: csv-report
//! description: "Summarize a CSV file into a markdown table"
//! ---
//!
//! Read the file with the csv module, then ...
//! ```
//!
//! Only top-level scalar lines are kept. Comments, list items, and indented
//! (nested) lines are ignored. Text without a recognizable block is all body.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static FRONTMATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n?(.*)").expect("frontmatter pattern is valid")
});

/// Parsed descriptor: flat frontmatter fields plus the trimmed body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub frontmatter: IndexMap<String, String>,
    pub body: String,
}

impl Descriptor {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).map(String::as_str)
    }
}

pub fn parse_descriptor(text: &str) -> Descriptor {
    let Some(caps) = FRONTMATTER_RE.captures(text) else {
        return Descriptor {
            frontmatter: IndexMap::new(),
            body: text.trim().to_string(),
        };
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    Descriptor {
        frontmatter: parse_fields(block),
        body: body.trim().to_string(),
    }
}

fn parse_fields(block: &str) -> IndexMap<String, String> {
    let mut fields = IndexMap::new();
    for line in block.lines() {
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let line = line.trim();
        if line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        if !key.is_empty() && !value.is_empty() {
            fields.insert(key.to_string(), value.to_string());
        }
    }
    fields
}
