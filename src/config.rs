//! Configuration module for the retrieval pipeline.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `MDRECALL_` and use
//! double underscores to separate nested levels:
//! - `MDRECALL_CHUNKING__MAX_CHUNK_CHARS=400` sets `chunking.max_chunk_chars`
//! - `MDRECALL_SEARCH__K=8` sets `search.k`
//! - `MDRECALL_SEMANTIC__MODEL=BGESmallENV15` sets `semantic.model`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Name of the configuration file searched for in the working directory.
pub const CONFIG_FILE: &str = "mdrecall.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Query-time search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Embedding model settings
    #[serde(default)]
    pub semantic: SemanticConfig,

    /// Logging levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for section body chunking.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters. Larger bodies are split.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Overlap between adjacent chunks in characters.
    #[serde(default = "default_overlap_chars")]
    pub overlap_chars: usize,
}

/// Query-time search settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Number of top chunks to retrieve per query.
    #[serde(default = "default_k")]
    pub k: usize,
}

/// Embedding model settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SemanticConfig {
    /// Model to use for embeddings
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

/// Logging levels, consumed by [`crate::logging::init_with_config`].
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all targets.
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `ingest = "debug"`.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_max_chunk_chars() -> usize {
    200
}
fn default_overlap_chars() -> usize {
    20
}
fn default_k() -> usize {
    4
}
fn default_embedding_model() -> String {
    "AllMiniLML6V2".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            search: SearchConfig::default(),
            semantic: SemanticConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            overlap_chars: default_overlap_chars(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { k: default_k() }
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl ChunkingConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_chars == 0 {
            return Err("max_chunk_chars must be positive".to_string());
        }
        if self.overlap_chars >= self.max_chunk_chars {
            return Err(format!(
                "overlap_chars ({}) must be less than max_chunk_chars ({})",
                self.overlap_chars, self.max_chunk_chars
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path))
            // Layer in environment variables with MDRECALL_ prefix
            // Use double underscore (__) to separate nested levels
            .merge(Env::prefixed("MDRECALL_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Create a default settings file
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
