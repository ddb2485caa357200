//! # App Configuration
//!
//! Unified configuration for storage, logging and the demo walkthrough.
//!
//! ## Environment Overrides
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `EM_DATA_FILE` | `storage.data_file` | `./data/ecomatch.json` |
//! | `EM_RESET_ON_START` | `storage.reset_on_start` | `false` |
//! | `EM_LOG` (then `RUST_LOG`) | `logging.filter` | `info` |
//! | `EM_DEMO` | `demo.run_walkthrough` | `true` |
//!
//! Configuration is read before logging exists, so unusable values come back
//! as [`IgnoredOverride`]s for the caller to report once a subscriber is up.

use std::path::PathBuf;

use thiserror::Error;

/// Complete app configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> (Self, Vec<IgnoredOverride>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden from `lookup`, keyed by variable name.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Self, Vec<IgnoredOverride>) {
        let mut config = Self::default();
        let mut ignored = Vec::new();

        if let Some(path) = lookup("EM_DATA_FILE") {
            config.storage.data_file = PathBuf::from(path);
        }
        if let Some(flag) = lookup("EM_RESET_ON_START") {
            apply_flag(
                "EM_RESET_ON_START",
                flag,
                &mut config.storage.reset_on_start,
                &mut ignored,
            );
        }
        if let Some(filter) = lookup("EM_LOG").or_else(|| lookup("RUST_LOG")) {
            config.logging.filter = filter;
        }
        if let Some(flag) = lookup("EM_DEMO") {
            apply_flag("EM_DEMO", flag, &mut config.demo.run_walkthrough, &mut ignored);
        }

        (config, ignored)
    }

    /// Rejects configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        if self.storage.data_file.is_dir() {
            return Err(ConfigError::DataFileIsDirectory(
                self.storage.data_file.clone(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(())
    }
}

/// An environment value that could not be applied; the default was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub key: &'static str,
    pub value: String,
}

fn apply_flag(
    key: &'static str,
    raw: String,
    target: &mut bool,
    ignored: &mut Vec<IgnoredOverride>,
) {
    match parse_flag(&raw) {
        Some(value) => *target = value,
        None => ignored.push(IgnoredOverride { key, value: raw }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Data file path is empty; set EM_DATA_FILE")]
    EmptyDataFile,

    #[error("Data file path {0} is a directory")]
    DataFileIsDirectory(PathBuf),

    #[error("Log filter is empty; set EM_LOG")]
    EmptyLogFilter,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON file holding the persisted store.
    pub data_file: PathBuf,
    /// Restore seed data right after opening.
    pub reset_on_start: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data/ecomatch.json"),
            reset_on_start: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Demo configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Run create → accept → complete → review once at startup.
    pub run_walkthrough: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            run_walkthrough: true,
        }
    }
}
