//! reqwest-backed scrape session
//!
//! One [`HttpSession`] is built per enumeration run and shared by every
//! source. It owns:
//!
//! - a `reqwest::Client` configured with the run's proxy and timeout
//! - an optional `governor` limiter gating request starts across sources
//! - the [`SubdomainExtractor`] for the target domain
//! - a [`KeyRotation`] cursor set for keyed sources

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use scout_application::{
    HttpResponse, ScrapeSession, SessionError, SessionFactory,
};
use scout_domain::{EnumerationOptions, KeyRotation};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::extractor::SubdomainExtractor;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("subscout/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP context for one enumeration run
pub struct HttpSession {
    client: reqwest::Client,
    limiter: Option<DefaultDirectRateLimiter>,
    extractor: SubdomainExtractor,
    keys: KeyRotation,
}

impl HttpSession {
    /// Build a session for `domain`.
    ///
    /// Fails with [`SessionError::Initialization`] when the proxy URL is
    /// malformed or the HTTP client cannot be built.
    pub fn new(domain: &str, options: &EnumerationOptions) -> Result<Self, SessionError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout);

        if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
                SessionError::Initialization(format!("invalid proxy '{}': {}", proxy, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| SessionError::Initialization(format!("HTTP client: {}", e)))?;

        let extractor = SubdomainExtractor::new(domain)
            .map_err(|e| SessionError::Initialization(format!("extractor: {}", e)))?;

        let limiter = NonZeroU32::new(options.rate_limit)
            .map(|per_second| RateLimiter::direct(Quota::per_second(per_second)));

        debug!(
            "Session for {} (rate limit: {}, timeout: {:?}, proxy: {})",
            domain,
            if options.is_rate_limited() {
                format!("{}/s", options.rate_limit)
            } else {
                "none".to_string()
            },
            options.timeout,
            options.proxy.is_some()
        );

        Ok(Self {
            client,
            limiter,
            extractor,
            keys: KeyRotation::new(),
        })
    }

    /// Wait for the rate limiter, if one is configured
    async fn acquire(&self, cancel: &CancellationToken) -> Result<(), SessionError> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SessionError::Cancelled),
            _ = limiter.until_ready() => Ok(()),
        }
    }
}

#[async_trait]
impl ScrapeSession for HttpSession {
    async fn get_with_headers(
        &self,
        cancel: &CancellationToken,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, SessionError> {
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }

        self.acquire(cancel).await?;

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let fetch = async {
            // Errors are stripped of their URL; some vendors take keys as query params
            let response = request
                .send()
                .await
                .map_err(|e| SessionError::Network(e.without_url().to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| SessionError::Network(e.without_url().to_string()))?;
            Ok::<_, SessionError>(HttpResponse::new(status, body))
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SessionError::Cancelled),
            response = fetch => response?,
        };

        trace!(status = response.status, bytes = response.body.len(), "GET completed");

        if !response.is_success() {
            return Err(SessionError::Status(response.status));
        }

        Ok(response)
    }

    fn extract(&self, text: &str) -> Option<String> {
        self.extractor.find(text)
    }

    fn pick_key(&self, keys: &[String], source: &str) -> Option<String> {
        self.keys.pick(keys, source)
    }
}

/// Builds an [`HttpSession`] per enumeration run
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSessionFactory;

impl HttpSessionFactory {
    pub fn new() -> Self {
        Self
    }
}

impl SessionFactory for HttpSessionFactory {
    fn create(
        &self,
        domain: &str,
        options: &EnumerationOptions,
    ) -> Result<Arc<dyn ScrapeSession>, SessionError> {
        Ok(Arc::new(HttpSession::new(domain, options)?))
    }
}
