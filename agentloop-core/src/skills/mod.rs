//! Skill discovery and lazy loading
//!
//! A skill is a directory containing a `SKILL.md` descriptor. Only names and
//! descriptions go into the system prompt; the full body is handed to the
//! model when it asks for it with `[SKILL LOAD <name>]`.

pub mod frontmatter;
mod loader;

pub use frontmatter::{Descriptor, parse_descriptor};
pub use loader::{Skill, SkillLoader, SkippedSkill};
