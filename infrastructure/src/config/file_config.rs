//! Raw TOML configuration data types
//!
//! These structs mirror the config file one-to-one. Conversion into domain
//! types ([`EnumerationOptions`], [`SourceSelection`]) happens here so the
//! CLI only has to layer its overrides on top.

use std::collections::HashMap;
use std::time::Duration;

use scout_domain::{EnumerationOptions, SourceSelection, normalize_source_name};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("max_enum_time_minutes cannot be 0")]
    InvalidMaxEnumTime,

    #[error("proxy must be a URL with a scheme, got '{0}'")]
    InvalidProxy(String),
}

/// `[enumeration]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEnumerationConfig {
    /// Requests per second across all sources, 0 = unlimited
    pub rate_limit: u32,
    /// Per-request timeout, 0 = built-in default
    pub timeout_seconds: u64,
    /// Deadline for a whole run
    pub max_enum_time_minutes: u64,
    pub proxy: Option<String>,
}

impl Default for FileEnumerationConfig {
    fn default() -> Self {
        Self {
            rate_limit: 0,
            timeout_seconds: 30,
            max_enum_time_minutes: 10,
            proxy: None,
        }
    }
}

/// `[sources]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourcesConfig {
    pub all: bool,
    pub recursive_only: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enumeration: FileEnumerationConfig,
    pub sources: FileSourcesConfig,
    /// Source name -> API keys
    pub keys: HashMap<String, Vec<String>>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.enumeration.max_enum_time_minutes == 0 {
            return Err(ConfigValidationError::InvalidMaxEnumTime);
        }

        if let Some(proxy) = self.enumeration.proxy.as_deref() {
            let proxy = proxy.trim();
            if !proxy.is_empty() && !proxy.contains("://") {
                return Err(ConfigValidationError::InvalidProxy(proxy.to_string()));
            }
        }

        Ok(())
    }

    pub fn enumeration_options(&self) -> EnumerationOptions {
        let mut options = EnumerationOptions::default()
            .with_rate_limit(self.enumeration.rate_limit)
            .with_timeout_secs(self.enumeration.timeout_seconds)
            .with_max_enum_time(Duration::from_secs(
                self.enumeration.max_enum_time_minutes.saturating_mul(60),
            ));
        if let Some(proxy) = &self.enumeration.proxy {
            options = options.with_proxy(proxy.as_str());
        }
        options
    }

    pub fn selection(&self) -> SourceSelection {
        SourceSelection::new()
            .with_sources(self.sources.include.iter().map(String::as_str))
            .with_excluded(self.sources.exclude.iter().map(String::as_str))
            .with_all(self.sources.all)
            .with_recursive_only(self.sources.recursive_only)
    }

    /// API keys by normalized source name, blank entries dropped
    pub fn api_keys(&self) -> HashMap<String, Vec<String>> {
        let mut keys: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in &self.keys {
            let values: Vec<String> = values
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
            if !values.is_empty() {
                keys.entry(normalize_source_name(name))
                    .or_default()
                    .extend(values);
            }
        }
        keys
    }
}
