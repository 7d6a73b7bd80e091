//! Configuration for the summarization pipeline

use crate::prompt::DEFAULT_CHAR_BUDGET;
use serde::{Deserialize, Serialize};

/// Configuration for the Pipeline
///
/// # Examples
///
/// ```
/// use synopsis_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.char_budget, 1000);
/// assert_eq!(config.checkpoint_every, 1);
/// assert!(config.rescan);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of characters of document text sent to the model
    pub char_budget: usize,

    /// Save the ledger after this many completed rows
    /// 0 saves only once, at the end of the pass
    pub checkpoint_every: usize,

    /// Append documents that appeared in the directory since the ledger was created
    pub rescan: bool,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.char_budget == 0 {
            return Err("char_budget must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Behave like a single end-of-pass save with no rescanning
    pub fn legacy() -> Self {
        Self {
            char_budget: DEFAULT_CHAR_BUDGET,
            checkpoint_every: 0,
            rescan: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            char_budget: DEFAULT_CHAR_BUDGET,
            checkpoint_every: 1,
            rescan: true,
        }
    }
}
