//! Configuration management

use crate::step::{StepError, Toolchain};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_ENV: &str = "BEAMSTEP_LOG_LEVEL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Log level
    pub log_level: String,
    /// Toolchain used when a step gives none
    pub default_toolchain: Toolchain,
    /// Append the build log to this file as well as the console
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_toolchain: Toolchain::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StepError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Loads `path` if given, otherwise the defaults, then applies the
    /// environment override
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be read or parsed.
    pub fn resolve(path: Option<&Path>) -> Result<Self, StepError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_override(std::env::var(LOG_LEVEL_ENV).ok()))
    }

    /// Replaces the log level when an override is present and non-empty
    #[must_use]
    pub fn with_env_override(mut self, log_level: Option<String>) -> Self {
        if let Some(level) = log_level.filter(|l| !l.is_empty()) {
            self.log_level = level;
        }
        self
    }
}
