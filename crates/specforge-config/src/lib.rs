//! Configuration system for SpecForge.
//!
//! Load specification settings from TOML or YAML files to control when
//! predicates are compiled, how deep expressions may nest, and the default
//! log filter, without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use specforge_config::SpecConfig;
//! use specforge_core::CompileMode;
//!
//! let config = SpecConfig::from_toml_str(r#"
//!     compile_mode = "lazy"
//!
//!     [validation]
//!     max_depth = 32
//!
//!     [logging]
//!     filter = "specforge=debug"
//! "#).unwrap();
//!
//! assert_eq!(config.compile_mode, CompileMode::Lazy);
//! assert_eq!(config.compile_options().max_depth, Some(32));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use specforge_config::SpecConfig;
//!
//! let config = SpecConfig::load("specforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```


use std::path::Path;

use serde::{Deserialize, Serialize};
use specforge_core::{CompileMode, CompileOptions};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main specification configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SpecConfig {
    /// When predicates are compiled.
    #[serde(default)]
    pub compile_mode: CompileMode,

    /// Construction-time validation limits.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SpecConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    /// Files ending in `.yaml`/`.yml` are read as YAML, all others as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the compile mode.
    pub fn with_compile_mode(mut self, mode: CompileMode) -> Self {
        self.compile_mode = mode;
        self
    }

    /// Sets the maximum expression depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.validation.max_depth = Some(max_depth);
        self
    }

    /// Sets the default log filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = Some(filter.into());
        self
    }

    /// Options for building predicates under this configuration.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            mode: self.compile_mode,
            max_depth: self.validation.max_depth,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.max_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "validation.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validation limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Maximum depth of an expression body. Unbounded when absent.
    pub max_depth: Option<usize>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}
