//! Configuration management for the asset inventory component

use assetinv_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default display name of the report component
pub const DEFAULT_COMPONENT_NAME: &str = "Zmap Asset Inventory";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Report component settings
    #[serde(default)]
    pub component: ComponentConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (ASSETINV_ prefix)
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Component settings
        if let Some(val) = var("ASSETINV_COMPONENT_NAME") {
            self.component.name = val;
        }
        if let Some(val) = var("ASSETINV_ASSETS_FILE") {
            self.component.assets_file = Some(val);
        }

        // Logging
        if let Some(val) = var("ASSETINV_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = var("ASSETINV_LOG_FORMAT") {
            self.logging.format = val;
        }

        self
    }
}

/// Report component configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Display name of the component in the report
    #[serde(default = "default_component_name")]
    pub name: String,

    /// Optional summary text shown above the tables
    pub summary: Option<String>,

    /// Path of the uploaded asset scan CSV
    pub assets_file: Option<String>,

    /// Start the component on a new page
    #[serde(default)]
    pub page_break_before: bool,

    /// Render the component title
    #[serde(default = "default_true")]
    pub show_title: bool,
}

fn default_component_name() -> String {
    String::from(DEFAULT_COMPONENT_NAME)
}

fn default_true() -> bool {
    true
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            name: default_component_name(),
            summary: None,
            assets_file: None,
            page_break_before: false,
            show_title: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn component_name(mut self, name: impl Into<String>) -> Self {
        self.config.component.name = name.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.config.component.summary = Some(summary.into());
        self
    }

    pub fn assets_file(mut self, path: impl Into<String>) -> Self {
        self.config.component.assets_file = Some(path.into());
        self
    }

    pub fn page_break_before(mut self, enabled: bool) -> Self {
        self.config.component.page_break_before = enabled;
        self
    }

    pub fn show_title(mut self, enabled: bool) -> Self {
        self.config.component.show_title = enabled;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
