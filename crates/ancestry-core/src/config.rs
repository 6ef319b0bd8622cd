//! Configuration for query output and graph strategy.
//!
//! Load order: `.ancestry/config.toml` → environment variables → defaults.

use crate::error::{AncestryError, Result};
use crate::lca::DagStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AncestryConfig {
    pub output: OutputConfig,
    pub graph: GraphConfig,
}

/// How query results are printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

/// Graph query settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Algorithm used by `dag` queries unless overridden on the command line.
    pub strategy: DagStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AncestryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AncestryError::Config(format!(
                "unknown output format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty: true,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(parsed) = v.parse()
    {
        *target = parsed;
    }
}

impl AncestryConfig {
    /// Load config from `.ancestry/config.toml` under `root`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(".ancestry").join("config.toml");

        let mut config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|source| AncestryError::Io {
                    path: config_path.clone(),
                    source,
                })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        env_override("ANCESTRY_OUTPUT_FORMAT", &mut config.output.format);
        env_override("ANCESTRY_PRETTY", &mut config.output.pretty);
        env_override("ANCESTRY_DAG_STRATEGY", &mut config.graph.strategy);

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AncestryError::Config(e.to_string()))
    }
}
