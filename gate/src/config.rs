//! Harness configuration.
//!
//! TOML-backed configuration for a run: which categories are allowed to
//! execute, whether to stop at the first failure, and where to write the
//! JSON report.
//!
//! ```toml
//! [run]
//! allowed_categories = ["unit", "integration"]
//! fail_fast = false
//!
//! [report]
//! path = "target/testgate-report.json"
//! ```

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed configuration is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Run-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    /// Categories permitted to execute.
    pub allowed_categories: Vec<Category>,
    /// Stop after the first failed or errored case.
    pub fail_fast: bool,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            // Browser runs stay opt-in.
            allowed_categories: vec![Category::unit(), Category::integration()],
            fail_fast: false,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Where to write the JSON report. Absent means no file output.
    pub path: Option<PathBuf>,
}

/// Top-level harness configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Run-level settings.
    pub run: RunSection,
    /// Report output settings.
    pub report: ReportSection,
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the allow-set.
    pub fn with_allowed_categories(mut self, categories: Vec<Category>) -> Self {
        self.run.allowed_categories = categories;
        self
    }

    /// Stop after the first failed or errored case.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.run.fail_fast = fail_fast;
        self
    }

    /// Write the JSON report to `path` after the run.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report.path = Some(path.into());
        self
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::Invalid`] when validation rejects the result.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, plus
    /// the errors of [`HarnessConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.run.allowed_categories.iter().any(Category::is_empty) {
            return Err("allowed_categories must not contain empty labels".to_string());
        }

        if let Some(path) = &self.report.path {
            if path.as_os_str().is_empty() {
                return Err("report.path must not be empty".to_string());
            }
        }

        Ok(())
    }
}
