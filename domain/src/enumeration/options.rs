//! Per-run enumeration parameters

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default wall-clock budget for a whole enumeration run
pub const DEFAULT_MAX_ENUM_TIME: Duration = Duration::from_secs(10 * 60);

/// Transport and deadline settings for one enumeration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationOptions {
    /// Proxy URL applied to every outbound request
    pub proxy: Option<String>,
    /// Maximum request starts per second across all sources (0 = unlimited)
    pub rate_limit: u32,
    /// Per-request timeout
    pub timeout: Duration,
    /// Upper bound on the whole run; sources are cancelled when it elapses
    pub max_enum_time: Duration,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            rate_limit: 0,
            timeout: DEFAULT_TIMEOUT,
            max_enum_time: DEFAULT_MAX_ENUM_TIME,
        }
    }
}

impl EnumerationOptions {
    // ==================== Builder Methods ====================

    /// Set the proxy; empty strings clear it.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        let proxy = proxy.into();
        self.proxy = if proxy.trim().is_empty() {
            None
        } else {
            Some(proxy.trim().to_string())
        };
        self
    }

    pub fn with_rate_limit(mut self, per_second: u32) -> Self {
        self.rate_limit = per_second;
        self
    }

    /// Set the per-request timeout in seconds; `0` keeps the default.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = if secs == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(secs)
        };
        self
    }

    pub fn with_max_enum_time(mut self, max: Duration) -> Self {
        self.max_enum_time = max;
        self
    }

    // ==================== Queries ====================

    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit > 0
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_enum_time.is_zero() {
            return Err(DomainError::InvalidOptions(
                "max enumeration time must be greater than zero".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(DomainError::InvalidOptions(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
