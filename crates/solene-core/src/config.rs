use crate::error::{Result, SoleneError};
use crate::sources::InputFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "solene.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered exporter configuration
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Export format used when the output path has no extension
    pub format: ConfigValue<String>,
    pub input_format: ConfigValue<InputFormat>,
    pub progress: ConfigValue<bool>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            format: ConfigValue::new("cir".to_string(), ConfigSource::Default),
            input_format: ConfigValue::new(InputFormat::Auto, ConfigSource::Default),
            progress: ConfigValue::new(true, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| SoleneError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| SoleneError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(format) = file_config.format {
            self.format.update(format, ConfigSource::File);
        }

        if let Some(input_format) = file_config.input_format {
            self.input_format.update(input_format, ConfigSource::File);
        }

        if let Some(progress) = file_config.progress {
            self.progress.update(progress, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file if it exists, keep the current values otherwise
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // SOLENE_FORMAT
        if let Ok(format) = env::var("SOLENE_FORMAT") {
            self.format.update(format.to_lowercase(), ConfigSource::Environment);
        }

        // SOLENE_INPUT_FORMAT
        if let Ok(input_str) = env::var("SOLENE_INPUT_FORMAT") {
            match InputFormat::parse(&input_str) {
                Ok(input_format) => {
                    self.input_format.update(input_format, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid SOLENE_INPUT_FORMAT value '{}': expected auto, wkt, or geojson",
                    input_str
                ),
            }
        }

        // SOLENE_PROGRESS
        if let Ok(progress_str) = env::var("SOLENE_PROGRESS") {
            match parse_bool(&progress_str) {
                Ok(progress) => self.progress.update(progress, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SOLENE_PROGRESS value '{}': expected true or false",
                    progress_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(format) = overrides.format {
            self.format.update(format, ConfigSource::Cli);
        }

        if let Some(input_format) = overrides.input_format {
            self.input_format.update(input_format, ConfigSource::Cli);
        }

        if let Some(progress) = overrides.progress {
            self.progress.update(progress, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("format".to_string(), (self.format.value.clone(), self.format.source));

        map.insert(
            "input_format".to_string(),
            (self.input_format.value.to_string(), self.input_format.source),
        );

        map.insert(
            "progress".to_string(),
            (self.progress.value.to_string(), self.progress.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    format: Option<String>,
    input_format: Option<InputFormat>,
    progress: Option<bool>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub format: Option<String>,
    pub input_format: Option<InputFormat>,
    pub progress: Option<bool>,
}

/// Parse a boolean flag value
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SoleneError::ConfigInvalid {
            key: "progress".to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}
