//! API key resolution for the OpenAI-compatible endpoint.
//!
//! Keys are looked up from, in order: an explicit override (CLI flag), the
//! configuration file, and finally the environment (after `.env` loading).
//! Local endpoints such as Ollama need no key, so an empty result is valid.

use crate::config::constants::defaults;
use anyhow::Result;
use std::env;
use tracing::{debug, warn};

/// Where to look for the API key
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Value passed on the command line
    pub cli_override: Option<String>,
    /// Value from the `[llm]` section of the config file
    pub config_value: Option<String>,
    /// Environment variable consulted last
    pub env_var: String,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self {
            cli_override: None,
            config_value: None,
            env_var: defaults::DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// Load environment variables from a `.env` file in the current directory
///
/// A missing file is not an error; a malformed one is logged and ignored.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment variables from .env");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!(error = %e, "failed to load .env file");
            Ok(())
        }
    }
}

/// Resolve the API key, returning an empty string when none is configured
pub fn resolve_api_key(sources: &ApiKeySources) -> String {
    let non_empty = |value: &Option<String>| value.clone().filter(|key| !key.is_empty());

    if let Some(key) = non_empty(&sources.cli_override) {
        return key;
    }
    if let Some(key) = non_empty(&sources.config_value) {
        return key;
    }
    env::var(&sources.env_var).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins() {
        let sources = ApiKeySources {
            cli_override: Some("from-cli".to_string()),
            config_value: Some("from-config".to_string()),
            env_var: "AGENTLOOP_TEST_KEY_UNSET_1".to_string(),
        };
        assert_eq!(resolve_api_key(&sources), "from-cli");
    }

    #[test]
    fn empty_override_falls_through_to_config() {
        let sources = ApiKeySources {
            cli_override: Some(String::new()),
            config_value: Some("from-config".to_string()),
            env_var: "AGENTLOOP_TEST_KEY_UNSET_2".to_string(),
        };
        assert_eq!(resolve_api_key(&sources), "from-config");
    }

    #[test]
    fn missing_everywhere_is_empty() {
        let sources = ApiKeySources {
            env_var: "AGENTLOOP_TEST_KEY_UNSET_3".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&sources), "");
    }
}
