//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use synopsis_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use synopsis_pipeline::PipelineConfig;
use tracing::debug;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "synopsis.toml";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source directory and ledger location
    pub settings: Settings,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Summarization pass settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Required settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the documents
    pub directives_dir: PathBuf,

    /// Ledger file name, relative to `directives_dir`
    pub csv_file_name: String,
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Chat Completions API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Configuration file in the user's home directory.
    pub fn home_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".synopsis").join("config.toml"))
    }

    /// Find the configuration file to use.
    ///
    /// An explicit path wins. Otherwise `./synopsis.toml` is tried, then
    /// `~/.synopsis/config.toml`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok(local);
        }

        match Self::home_path() {
            Some(home) if home.is_file() => Ok(home),
            _ => Err(CliError::Config(format!(
                "No configuration file found. Create ./{} or pass --config",
                CONFIG_FILE_NAME
            ))),
        }
    }

    /// Locate and load the configuration file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::locate(explicit)?;
        debug!("Loading configuration from {}", path.display());
        Self::from_file(&path)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), config_message(e))))
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| CliError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.settings.directives_dir.as_os_str().is_empty() {
            return Err(CliError::Config("settings.directives_dir is empty".into()));
        }
        if self.settings.csv_file_name.trim().is_empty() {
            return Err(CliError::Config("settings.csv_file_name is empty".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(CliError::Config(
                "llm.timeout_secs must be greater than 0".into(),
            ));
        }
        self.pipeline.validate().map_err(CliError::Config)
    }

    /// Source directory, which must exist.
    pub fn source_dir(&self) -> Result<&Path> {
        let dir = self.settings.directives_dir.as_path();
        if !dir.is_dir() {
            return Err(CliError::Config(format!(
                "directives_dir {} is not a directory",
                dir.display()
            )));
        }
        Ok(dir)
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.settings
            .directives_dir
            .join(&self.settings.csv_file_name)
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        let name = &self.llm.api_key_env;
        match env::var(name) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CliError::Config(format!(
                "environment variable {} is not set",
                name
            ))),
        }
    }
}

// Strip the "Configuration error: " prefix when re-wrapping with a path
fn config_message(error: CliError) -> String {
    match error {
        CliError::Config(message) => message,
        other => other.to_string(),
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
