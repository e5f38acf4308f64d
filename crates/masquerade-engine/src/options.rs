use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{AnonymizeError, Result};
use crate::logging::LogConfig;

/// What to do when the previous file of a `FileSpec` field cannot be deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Log a warning and keep going.
    #[default]
    BestEffort,
    /// Abort the object with the deletion error.
    Strict,
}

/// Options for the anonymization engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnonymizeOptions {
    /// Seed for reproducible runs; a random seed is drawn when unset.
    pub seed: Option<u64>,
    /// Length used when a string marker leaves `min_length` unset.
    pub default_min_length: usize,
    /// Length used when a string marker leaves `max_length` unset.
    pub default_max_length: usize,
    /// Upper bound for unbounded repetitions in regex patterns.
    pub max_regex_repeat: u32,
    pub removal_policy: RemovalPolicy,
    /// Number of lorem paragraphs written into materialized files.
    pub file_content_paragraphs: usize,
    /// `[logging]` table, consumed by `init_logging`.
    pub logging: LogConfig,
}

impl Default for AnonymizeOptions {
    fn default() -> Self {
        Self {
            seed: None,
            default_min_length: 5,
            default_max_length: 15,
            max_regex_repeat: 32,
            removal_policy: RemovalPolicy::BestEffort,
            file_content_paragraphs: 3,
            logging: LogConfig::default(),
        }
    }
}

impl AnonymizeOptions {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: AnonymizeOptions =
            toml::from_str(content).map_err(|err| AnonymizeError::Options(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AnonymizeError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_min_length > self.default_max_length {
            return Err(AnonymizeError::Options(
                "default_min_length must be <= default_max_length".to_string(),
            ));
        }
        if self.max_regex_repeat == 0 {
            return Err(AnonymizeError::Options(
                "max_regex_repeat must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
