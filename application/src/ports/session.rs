//! Scrape session port
//!
//! Defines the per-run shared context every source talks through: a
//! rate-limited HTTP transport, the target-domain extractor and API key
//! rotation. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use scout_domain::EnumerationOptions;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while building or using a session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session initialization failed: {0}")]
    Initialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl SessionError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Cancelled)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Parse(err.to_string())
    }
}

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SessionError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Iterate over non-empty, trimmed body lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Shared context for one enumeration run
///
/// One session is shared by every source running against the same domain.
/// The transport is read concurrently; the rate limiter inside it gates
/// request *starts* across all sources, never response handling.
#[async_trait]
pub trait ScrapeSession: Send + Sync {
    /// Rate-limited GET with extra request headers.
    ///
    /// Returns [`SessionError::Cancelled`] as soon as `cancel` fires, and
    /// [`SessionError::Status`] for non-2xx responses.
    async fn get_with_headers(
        &self,
        cancel: &CancellationToken,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, SessionError>;

    /// Rate-limited GET
    async fn simple_get(
        &self,
        cancel: &CancellationToken,
        url: &str,
    ) -> Result<HttpResponse, SessionError> {
        self.get_with_headers(cancel, url, &[]).await
    }

    /// Longest hostname in `text` that belongs to the target domain
    fn extract(&self, text: &str) -> Option<String>;

    /// Next API key for `source` from `keys`; `None` when there is none to use
    fn pick_key(&self, keys: &[String], source: &str) -> Option<String>;
}

/// Builds one session per enumeration run
pub trait SessionFactory: Send + Sync {
    /// Build a session for `domain`.
    ///
    /// The only failure mode is [`SessionError::Initialization`], which aborts
    /// the run before any source starts.
    fn create(
        &self,
        domain: &str,
        options: &EnumerationOptions,
    ) -> Result<Arc<dyn ScrapeSession>, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        names: Vec<String>,
    }

    #[test]
    fn test_response_json() {
        let response = HttpResponse::new(200, r#"{"names": ["a", "b"]}"#);
        let payload: Payload = response.json().unwrap();
        assert_eq!(payload.names, vec!["a", "b"]);
    }

    #[test]
    fn test_response_json_parse_error() {
        let response = HttpResponse::new(200, "<html>");
        let err = response.json::<Payload>().err().unwrap();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[test]
    fn test_response_lines() {
        let response = HttpResponse::new(200, "a\n\n  b  \r\nc\n");
        assert_eq!(response.lines().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(429, "").is_success());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SessionError::Status(401).to_string(),
            "Unexpected HTTP status 401"
        );
        assert!(SessionError::Cancelled.is_cancelled());
        assert!(!SessionError::Network("reset".into()).is_cancelled());
    }
}
