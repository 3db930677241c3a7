//! CLI configuration.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// REST API base URL, e.g. `https://example.com/wp-json`.
    pub base_url: Option<String>,

    /// Default headers added to every request (auth tokens, nonces).
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl CliConfig {
    /// Load config from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path))
    }
}
