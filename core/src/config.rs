//! Configuration for the core crate
//!
//! This module provides configuration options for building a store:
//! where the seed tables come from and how verbose logging should be.

use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use crate::error::{to_config_error, StudioError};

/// Log levels accepted by `StoreConfig::log_level`
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON seed file; the built-in seed is used when unset
    pub seed_file: Option<PathBuf>,

    /// Log level
    pub log_level: String,

    /// Whether to enable debug mode; raises the log filter to at least `debug`
    pub debug_mode: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            seed_file: None,
            log_level: "info".to_string(),
            debug_mode: false,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self, StudioError> {
        let file = std::fs::File::open(path)?;
        let config: StoreConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &str) -> Result<(), StudioError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Check the log level against the known levels
    pub fn validate(&self) -> Result<(), StudioError> {
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(to_config_error(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }

    /// Log filter to apply, with debug mode raising quieter levels to `debug`
    pub fn log_filter(&self) -> String {
        let level = self.log_level.to_ascii_lowercase();
        match level.as_str() {
            "off" | "error" | "warn" | "info" if self.debug_mode => "debug".to_string(),
            _ => level,
        }
    }

    /// Create a development configuration
    pub fn development() -> Self {
        let mut config = Self::default();
        config.debug_mode = true;
        config.log_level = "debug".to_string();
        config
    }

    /// Create a testing configuration
    pub fn testing() -> Self {
        let mut config = Self::default();
        config.log_level = "warn".to_string();
        config
    }
}
