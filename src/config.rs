//! Configuration loading and management for tldr.
//!
//! Settings come from `tldr.toml` (in the working directory or
//! `~/.config/tldr/`), with environment variable overrides. Every field has a
//! default, so running without a config file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "llama3.2-vision:11b";
/// Character budget used when nothing else is configured
pub const DEFAULT_MAX_CHARS: i64 = 500;
/// Placeholder article URL
pub const DEFAULT_URL: &str = "https://example.com/article";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OLLAMA_BINARY: &str = "ollama";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

const CONFIG_FILE_NAME: &str = "tldr.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// What to summarize with and how long the result may be
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Ollama model identifier (e.g., "llama3.2-vision:11b")
    pub model: String,
    /// Maximum characters in the final summary. Zero or negative means an
    /// empty budget.
    pub max_chars: i64,
}

/// Article retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Shell out to `ollama run`
    #[default]
    Cli,
    /// POST to the Ollama HTTP API
    Http,
}

/// Completion backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Path or name of the `ollama` executable
    pub binary: String,
    /// Base URL of the Ollama server
    pub endpoint: String,
    /// Optional limit on a single completion call; unset waits forever
    pub timeout_secs: Option<u64>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryConfig,
    pub fetch: FetchConfig,
    pub backend: BackendConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    /// when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read_file(&path)?,
            None => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Override from environment variables
    fn apply_env(&mut self) {
        if let Ok(model) = std::env::var("TLDR_MODEL") {
            self.summary.model = model;
        }
        if let Ok(binary) = std::env::var("OLLAMA_BIN") {
            self.backend.binary = binary;
        }
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            self.backend.endpoint = normalize_endpoint(&host);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        dirs::home_dir()
            .map(|home| home.join(".config").join("tldr").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }
}

/// `OLLAMA_HOST` is often given as `host:port` without a scheme
fn normalize_endpoint(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            binary: DEFAULT_OLLAMA_BINARY.to_string(),
            endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}
