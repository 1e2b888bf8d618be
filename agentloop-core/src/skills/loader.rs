use super::frontmatter::parse_descriptor;
use crate::config::constants::skills;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One discovered skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub description: String,
    /// Instruction body (everything after the frontmatter)
    pub content: String,
    /// Directory holding the descriptor
    pub path: PathBuf,
}

/// A descriptor or directory that discovery could not read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSkill {
    pub path: PathBuf,
    pub reason: String,
}

/// Scans skill roots for `SKILL.md` descriptors and caches them by name
#[derive(Debug, Clone, Default)]
pub struct SkillLoader {
    roots: Vec<PathBuf>,
    cache: IndexMap<String, Skill>,
    skipped: Vec<SkippedSkill>,
}

impl SkillLoader {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots.into_iter().map(|p| resolve_root(p.as_ref())).collect(),
            cache: IndexMap::new(),
            skipped: Vec::new(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Rebuild the cache from scratch and return every skill found
    pub fn discover(&mut self) -> Vec<&Skill> {
        self.cache.clear();
        self.skipped.clear();

        for root in self.roots.clone() {
            if !root.is_dir() {
                debug!(root = %root.display(), "skill root not found");
                continue;
            }
            for entry in self.sorted_entries(&root) {
                self.try_load(&entry);
                // one more level for grouped layouts
                if entry.is_dir() {
                    for nested in self.sorted_entries(&entry) {
                        self.try_load(&nested);
                    }
                }
            }
        }

        info!(
            skills = self.cache.len(),
            skipped = self.skipped.len(),
            "skill discovery finished"
        );
        self.cache.values().collect()
    }

    /// Look up a skill, discovering first if nothing is cached
    pub fn get(&mut self, name: &str) -> Option<&Skill> {
        self.ensure_discovered();
        self.cache.get(name)
    }

    /// Sorted skill names, discovering first if nothing is cached
    pub fn list_names(&mut self) -> Vec<String> {
        self.ensure_discovered();
        let mut names: Vec<String> = self.cache.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name/description summary for the system prompt, empty when there are no skills
    pub fn descriptions(&mut self) -> String {
        let names = self.list_names();
        if names.is_empty() {
            return String::new();
        }

        let mut lines = vec!["## Available Skills".to_string(), String::new()];
        for name in &names {
            let description = self
                .cache
                .get(name)
                .map(|s| s.description.as_str())
                .unwrap_or_default();
            lines.push(format!("- **{name}** — {description}"));
        }
        lines.push(String::new());
        lines.push("Use [SKILL LOAD <name>] to read a skill's full instructions.".to_string());
        lines.join("\n")
    }

    /// Descriptors skipped by the last discovery
    pub fn skipped(&self) -> &[SkippedSkill] {
        &self.skipped
    }

    fn ensure_discovered(&mut self) {
        if self.cache.is_empty() {
            self.discover();
        }
    }

    fn sorted_entries(&mut self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.skip(dir, e.to_string());
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        paths.sort();
        paths
    }

    fn try_load(&mut self, dir: &Path) {
        let descriptor = dir.join(skills::DESCRIPTOR_FILE);
        if !descriptor.is_file() {
            return;
        }

        let text = match fs::read_to_string(&descriptor) {
            Ok(text) => text,
            Err(e) => {
                self.skip(&descriptor, e.to_string());
                return;
            }
        };

        let parsed = parse_descriptor(&text);
        let name = parsed
            .field("name")
            .map(str::to_string)
            .unwrap_or_else(|| dir_name(dir));

        if self.cache.contains_key(&name) {
            debug!(skill = %name, path = %dir.display(), "duplicate skill name ignored");
            return;
        }

        debug!(skill = %name, path = %dir.display(), "loaded skill");
        let description = parsed.field("description").unwrap_or_default().to_string();
        self.cache.insert(
            name.clone(),
            Skill {
                name,
                description,
                content: parsed.body,
                path: dir.to_path_buf(),
            },
        );
    }

    fn skip(&mut self, path: &Path, reason: String) {
        warn!(path = %path.display(), error = %reason, "skipping unreadable skill");
        self.skipped.push(SkippedSkill {
            path: path.to_path_buf(),
            reason,
        });
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Expand `~` and anchor relative roots at the current directory
fn resolve_root(path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        return expanded;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&expanded))
        .unwrap_or(expanded)
}
