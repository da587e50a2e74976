//! Persistent configuration
//!
//! TOML file at `~/.pdfqa/config.toml`, created with defaults on first load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::document::chunker::ChunkerConfig;
use crate::errors::{RagError, Result};
use crate::generation::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use crate::qa::agent::{AgentConfig, DEFAULT_TOP_K};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    /// Load configuration from file, creating the default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| RagError::Config(format!("failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| RagError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RagError::Config("could not determine home directory".to_string()))?;

        Ok(home.join(".pdfqa").join("config.toml"))
    }

    /// Agent configuration derived from the retrieval section
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            chunker: ChunkerConfig {
                chunk_size: self.retrieval.chunk_size,
                chunk_overlap: self.retrieval.chunk_overlap,
            },
            top_k: self.retrieval.top_k,
        }
    }
}
