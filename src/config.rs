//! Configuration management for wordpos.
//!
//! Handles loading configuration from TOML files: where the WordNet
//! dictionary lives, lookup limits, and stopword handling.

use crate::error::{Result, WordposError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for wordpos.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Dictionary location.
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Input parsing settings.
    #[serde(default)]
    pub parse: ParseConfig,
}

/// Dictionary configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// WordNet `dict/` directory.
    pub path: Option<PathBuf>,
}

/// Lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupConfig {
    /// Per-call timeout in milliseconds. Unset waits indefinitely.
    pub call_timeout_ms: Option<u64>,

    /// Words sampled per random query.
    #[serde(default = "default_random_count")]
    pub random_count: usize,
}

fn default_random_count() -> usize {
    1
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: None,
            random_count: default_random_count(),
        }
    }
}

impl LookupConfig {
    /// Returns the per-call timeout, if configured.
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }
}

/// Input parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseConfig {
    /// Whether stopwords are removed from the input.
    #[serde(default = "default_stopwords")]
    pub stopwords: bool,

    /// Words added to the built-in stopword list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

fn default_stopwords() -> bool {
    true
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            stopwords: default_stopwords(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordpos")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| WordposError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            WordposError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.lookup.random_count == 0 {
            return Err(WordposError::config("lookup.random_count must be at least 1"));
        }
        Ok(())
    }
}
