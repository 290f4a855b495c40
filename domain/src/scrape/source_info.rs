//! Source capability flags

use serde::{Deserialize, Serialize};

/// Static description of a data source
///
/// Captures the capability flags a source reports. They never change after
/// construction, so a snapshot is safe to hand to listings and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Lower-cased source name (registry key)
    pub name: String,
    /// Included when no explicit selection is given
    pub is_default: bool,
    /// Output is suitable for recursive enumeration passes
    pub has_recursive_support: bool,
    /// Requires at least one API key to produce anything
    pub needs_key: bool,
}

impl SourceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: normalize_source_name(&name.into()),
            is_default: false,
            has_recursive_support: false,
            needs_key: false,
        }
    }

    pub fn default_source(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn recursive(mut self) -> Self {
        self.has_recursive_support = true;
        self
    }

    pub fn keyed(mut self) -> Self {
        self.needs_key = true;
        self
    }
}

/// Canonical registry key for a source name
///
/// Source identity is case-insensitive.
pub fn normalize_source_name(name: &str) -> String {
    name.trim().to_lowercase()
}
