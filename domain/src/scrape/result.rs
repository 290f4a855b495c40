//! Scrape result value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single item produced by a source (Value Object)
///
/// Results are immutable once emitted and are forwarded unmodified from the
/// source that produced them to the consumer of an enumeration run.
///
/// Serialized with an internal `kind` tag:
///
/// ```json
/// {"kind": "subdomain", "source": "crtsh", "value": "api.example.com"}
/// {"kind": "error", "source": "chaos", "error": "HTTP status 401"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrapeResult {
    /// A discovered hostname
    Subdomain { source: String, value: String },
    /// A failure reported by a source
    Error { source: String, error: String },
}

impl ScrapeResult {
    pub fn subdomain(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Subdomain {
            source: source.into(),
            value: value.into(),
        }
    }

    pub fn error(source: impl Into<String>, error: impl fmt::Display) -> Self {
        Self::Error {
            source: source.into(),
            error: error.to_string(),
        }
    }

    /// Name of the source that produced this result
    pub fn source(&self) -> &str {
        match self {
            Self::Subdomain { source, .. } | Self::Error { source, .. } => source,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The discovered hostname, if this is a subdomain result
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Subdomain { value, .. } => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if this is an error result
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error, .. } => Some(error),
            Self::Subdomain { .. } => None,
        }
    }
}

impl fmt::Display for ScrapeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subdomain { source, value } => write!(f, "[{}] {}", source, value),
            Self::Error { source, error } => write!(f, "[{}] error: {}", source, error),
        }
    }
}
