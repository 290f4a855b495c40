//! Canned session for exercising sources without the network

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scout_application::{CancellationToken, HttpResponse, ScrapeSession, SessionError};
use scout_domain::KeyRotation;

use crate::session::SubdomainExtractor;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Answers every GET with the same reply and records what was asked
pub struct StubSession {
    reply: Result<String, SessionError>,
    extractor: SubdomainExtractor,
    keys: KeyRotation,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubSession {
    fn build(domain: &str, reply: Result<String, SessionError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            extractor: SubdomainExtractor::new(domain).unwrap(),
            keys: KeyRotation::new(),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// 200 OK with `body`
    pub fn replying(domain: &str, body: &str) -> Arc<Self> {
        Self::build(domain, Ok(body.to_string()))
    }

    /// Every request fails with a network error
    pub fn offline(domain: &str) -> Arc<Self> {
        Self::build(domain, Err(SessionError::Network("offline".to_string())))
    }

    pub fn failing(domain: &str, error: SessionError) -> Arc<Self> {
        Self::build(domain, Err(error))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScrapeSession for StubSession {
    async fn get_with_headers(
        &self,
        cancel: &CancellationToken,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, SessionError> {
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
        });
        match &self.reply {
            Ok(body) => Ok(HttpResponse::new(200, body.clone())),
            Err(e) => Err(e.clone()),
        }
    }

    fn extract(&self, text: &str) -> Option<String> {
        self.extractor.find(text)
    }

    fn pick_key(&self, keys: &[String], source: &str) -> Option<String> {
        self.keys.pick(keys, source)
    }
}
