use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::PlotConfig;
use crate::content_type::AudioFormat;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Page-level settings. Every field has a default, so an empty JSON object
/// yields the stock SoundStudio behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub upload: UploadConfig,
    pub notifications: NotificationConfig,
    pub validation: ValidationConfig,
    pub chart: PlotConfig,
    /// Max tracing level for the browser console ("trace" .. "error").
    pub log_level: String,
}

/// Border colours applied to the drop region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub highlight_color: String,
    pub idle_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Selector for the element banners are inserted into
    pub container_selector: String,
    /// Banners go before this child of the container; first child otherwise
    pub anchor_selector: String,
    pub error_timeout_ms: u64,
    pub success_timeout_ms: u64,
    pub error_class: String,
    pub success_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub accepted_types: Vec<AudioFormat>,
    pub max_size_bytes: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            upload: UploadConfig::default(),
            notifications: NotificationConfig::default(),
            validation: ValidationConfig::default(),
            chart: PlotConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            highlight_color: "#2980b9".to_string(),
            idle_color: "#3498db".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            container_selector: ".container".to_string(),
            anchor_selector: ".row".to_string(),
            error_timeout_ms: 5000,
            success_timeout_ms: 3000,
            error_class: "alert alert-danger alert-dismissible fade show".to_string(),
            success_class: "alert alert-success alert-dismissible fade show".to_string(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            accepted_types: vec![AudioFormat::Mpeg, AudioFormat::Wav, AudioFormat::Ogg],
            max_size_bytes: 16 * 1024 * 1024,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl StudioConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.accepted_types.is_empty() {
            return Err(ConfigError::Config(
                "validation.accepted_types must not be empty".to_string(),
            ));
        }
        if self.validation.max_size_bytes == 0 {
            return Err(ConfigError::Config(
                "validation.max_size_bytes must be greater than zero".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }
}
