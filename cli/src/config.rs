//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use aidchain_types::AidParams;
use aidchain_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("{0}")]
    Invalid(String),
}

/// Configuration for the `aidchain` client.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; every field
/// has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory of the local LMDB record store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// JSON-RPC endpoint of the signer bridge.
    #[serde(default = "default_signer_url")]
    pub signer_url: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    /// Donation and validation parameters.
    #[serde(default)]
    pub params: AidParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./aidchain_data")
}

fn default_signer_url() -> String {
    "http://127.0.0.1:8669".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_map_size_mb() -> usize {
    64
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_size_mb == 0 {
            return Err(ConfigError::Invalid("map_size_mb must be positive".into()));
        }
        self.params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            signer_url: default_signer_url(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            map_size_mb: default_map_size_mb(),
            params: AidParams::default(),
        }
    }
}
