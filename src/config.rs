//! YAML configuration for the detector.
//!
//! Names the four artifact files and the tokenizer settings in one document
//! so a deployment can swap artifacts without rebuilding.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! artifacts:
//!   dir: "/srv/phishnet/models"
//!   embedding: "word2vec_model.json"
//!   scaler: "scaler.json"
//!   logistic_regression: "logistic_regression_model.json"
//!   random_forest: "random_forest_model.json"
//!
//! tokenizer:
//!   version: 1
//!   lowercase: true
//!   strip_punctuation: true
//!   normalize_unicode: false
//! ```
//!
//! A relative `artifacts.dir` in a file loaded with
//! [`DetectorConfig::from_file`] is resolved against the file's own
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use canonical::TokenizerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Configuration format version
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub artifacts: ArtifactConfig,

    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

impl DetectorConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;

        if config.artifacts.dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.artifacts.dir = parent.join(&config.artifacts.dir);
            }
        }
        Ok(config)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DetectorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration with default file names inside `dir`.
    pub fn with_artifact_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts: ArtifactConfig {
                dir: dir.into(),
                ..ArtifactConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        self.artifacts.validate()?;
        self.tokenizer
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("tokenizer: {e}")))?;
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            name: None,
            artifacts: ArtifactConfig::default(),
            tokenizer: TokenizerConfig::default(),
        }
    }
}

/// Where the four pre-trained artifacts live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory holding the files below.
    pub dir: PathBuf,
    /// Word-embedding model (`.json`, or word2vec text as `.txt`/`.vec`).
    pub embedding: String,
    pub scaler: String,
    pub logistic_regression: String,
    pub random_forest: String,
}

impl ArtifactConfig {
    pub fn embedding_path(&self) -> PathBuf {
        self.dir.join(&self.embedding)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler)
    }

    pub fn logistic_regression_path(&self) -> PathBuf {
        self.dir.join(&self.logistic_regression)
    }

    pub fn random_forest_path(&self) -> PathBuf {
        self.dir.join(&self.random_forest)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        let files = [
            ("embedding", &self.embedding),
            ("scaler", &self.scaler),
            ("logistic_regression", &self.logistic_regression),
            ("random_forest", &self.random_forest),
        ];
        for (field, file) in files {
            if file.trim().is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "artifacts.{field} must name a file"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            embedding: "word2vec_model.json".to_string(),
            scaler: "scaler.json".to_string(),
            logistic_regression: "logistic_regression_model.json".to_string(),
            random_forest: "random_forest_model.json".to_string(),
        }
    }
}

fn default_config_version() -> String {
    "1.0".to_string()
}
