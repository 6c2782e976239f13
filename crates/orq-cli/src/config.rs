//! CLI configuration.
//!
//! Options are resolved in this order, later sources winning:
//! 1. Defaults
//! 2. YAML configuration file (`--config`)
//! 3. Environment variables with the `ORQ_` prefix
//! 4. Command-line flags

use std::path::Path;

use anyhow::{Context, Result};
use orq_oracle::CompileOptions;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Oracle compilation options.
    #[serde(flatten)]
    pub compile: CompileOptions,

    /// Reject oracles with more lines than this.
    pub max_lines: Option<usize>,
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the file (if any), then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.merge_env_from(|key| std::env::var(key).ok()))
    }

    /// Apply `ORQ_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn merge_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("ORQ_STRATEGY") {
            match v.parse() {
                Ok(strategy) => self.compile.strategy = strategy,
                Err(e) => warn!("ignoring ORQ_STRATEGY: {e}"),
            }
        }
        if let Some(v) = lookup("ORQ_COUNTER_CLEANUP") {
            match v.parse() {
                Ok(cleanup) => self.compile.counter_cleanup = cleanup,
                Err(e) => warn!("ignoring ORQ_COUNTER_CLEANUP: {e}"),
            }
        }
        if let Some(v) = lookup("ORQ_BARRIERS") {
            match v.parse() {
                Ok(barriers) => self.compile.barriers = barriers,
                Err(e) => warn!("ignoring ORQ_BARRIERS: {e}"),
            }
        }
        if let Some(v) = lookup("ORQ_MAX_LINES") {
            match v.parse() {
                Ok(max) => self.max_lines = Some(max),
                Err(e) => warn!("ignoring ORQ_MAX_LINES: {e}"),
            }
        }
        self
    }
}
