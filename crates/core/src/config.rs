//! Runner configuration via `faultline.toml`
//!
//! A missing file means defaults. `faultline config init` writes the
//! commented default file; edit it to change output mode, log level or the
//! set of fixtures a bare `faultline run` executes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "faultline.toml";

/// How fixture reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text, one fixture block after another
    Human,
    /// Pretty-printed JSON array of reports
    Json,
}

/// Runner configuration loaded from `faultline.toml`.
///
/// # Example
///
/// ```toml
/// output = "human"
/// log_level = "warn"
/// # fixtures = ["closure_capture", "stale_read_transfer"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultlineConfig {
    /// Output mode: `"human"` or `"json"`.
    #[serde(default = "default_output_str")]
    pub output: String,
    /// Tracing level: `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
    #[serde(default = "default_log_level_str")]
    pub log_level: String,
    /// Fixtures run when none are named on the command line. All when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<Vec<String>>,
}

fn default_output_str() -> String {
    "human".to_string()
}

fn default_log_level_str() -> String {
    "warn".to_string()
}

impl Default for FaultlineConfig {
    fn default() -> Self {
        Self {
            output: default_output_str(),
            log_level: default_log_level_str(),
            fixtures: None,
        }
    }
}

impl FaultlineConfig {
    /// Parse the output string into an [`OutputMode`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"human"` or `"json"`.
    pub fn output_mode(&self) -> Result<OutputMode> {
        match self.output.as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => Err(Error::Config(format!(
                "Invalid output mode '{}' in {}. Expected \"human\" or \"json\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Parse the log level string into a [`tracing::Level`].
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level.parse().map_err(|_| {
            Error::Config(format!(
                "Invalid log level '{}' in {}",
                self.log_level, CONFIG_FILE_NAME
            ))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# faultline runner configuration
#
# Output mode: "human" (default) or "json"
output = "human"

# Log level for diagnostics on stderr: error, warn (default), info, debug, trace
log_level = "warn"

# Fixtures executed by a bare `faultline run` (default: all).
# fixtures = ["tagged_record_pipeline", "average_age", "layered_processors",
#             "closure_capture", "stale_read_transfer", "tree_depth"]
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid output mode or log level.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: FaultlineConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.output_mode()?;
        config.log_level()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns whether a file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml())?;
        Ok(true)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
