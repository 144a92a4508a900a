//! Configuration loading for the knowledge base.
//!
//! Layered precedence: built-in defaults -> config file -> env vars.
//! Config file lives at ~/.config/knowledge-base/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::KnowledgeError;

/// Built-in default for recognized document extensions.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Search behavior defaults applied when a request omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Default number of results when a request does not specify one.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Hard cap on the number of results a request may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Minimum cosine score a result must reach to be returned.
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

fn default_limit() -> usize {
    5
}

fn default_max_limit() -> usize {
    10
}

fn default_min_score() -> f64 {
    0.01
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_score: default_min_score(),
        }
    }
}

impl SearchSettings {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_limit == 0 {
            return Err("default_limit must be > 0".to_string());
        }
        if self.max_limit < self.default_limit {
            return Err(format!(
                "max_limit ({}) must be >= default_limit ({})",
                self.max_limit, self.default_limit
            ));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(format!("min_score must be 0.0-1.0, got {}", self.min_score));
        }
        Ok(())
    }
}

/// Main knowledge-base settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Root directory containing the knowledge documents.
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,

    /// File extensions recognized as knowledge documents.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Search defaults.
    #[serde(default)]
    pub search: SearchSettings,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_knowledge_dir() -> PathBuf {
    ProjectDirs::from("", "", "knowledge-base")
        .map(|p| p.data_local_dir().join("knowledge"))
        .unwrap_or_else(|| PathBuf::from("./knowledge"))
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            knowledge_dir: default_knowledge_dir(),
            extensions: default_extensions(),
            search: SearchSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl KnowledgeConfig {
    /// Create a config rooted at the given directory, defaults elsewhere.
    pub fn with_root(knowledge_dir: impl Into<PathBuf>) -> Self {
        Self {
            knowledge_dir: knowledge_dir.into(),
            ..Default::default()
        }
    }

    /// Replace the recognized extension list.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/knowledge-base/config.toml)
    /// 3. Explicit config file (optional, higher precedence)
    /// 4. Environment variables (KNOWLEDGE_*)
    pub fn load(config_path: Option<&str>) -> Result<Self, KnowledgeError> {
        let config_dir = ProjectDirs::from("", "", "knowledge-base")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default(
                "knowledge_dir",
                default_knowledge_dir().to_string_lossy().to_string(),
            )
            .map_err(|e| KnowledgeError::Config(e.to_string()))?
            .set_default("extensions", default_extensions())
            .map_err(|e| KnowledgeError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| KnowledgeError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let settings: Self = builder
            .add_source(Environment::with_prefix("KNOWLEDGE").separator("__"))
            .build()
            .map_err(|e| KnowledgeError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| KnowledgeError::Config(e.to_string()))?;

        settings
            .search
            .validate()
            .map_err(KnowledgeError::Config)?;

        Ok(settings)
    }
}
