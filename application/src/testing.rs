//! In-memory fakes for exercising the agent and registry without network I/O.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scout_domain::{EnumerationOptions, KeyRotation, SourceInfo};
use tokio_util::sync::CancellationToken;

use crate::ports::session::{HttpResponse, ScrapeSession, SessionError, SessionFactory};
use crate::ports::source::Source;
use crate::ports::stream::ResultStream;

/// One scripted action of a [`FakeSource`]
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Found(&'static str),
    Fail(&'static str),
    Sleep(Duration),
    /// Sleep without looking at the cancellation token
    Stall(Duration),
    UntilCancelled,
}

pub(crate) struct FakeSource {
    info: SourceInfo,
    steps: Vec<Step>,
    keys: Arc<Mutex<Vec<String>>>,
    runs: Arc<AtomicUsize>,
}

impl FakeSource {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            info: SourceInfo::new(name),
            steps: Vec::new(),
            keys: Arc::new(Mutex::new(Vec::new())),
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn default_source(mut self) -> Self {
        self.info = self.info.default_source();
        self
    }

    pub(crate) fn recursive(mut self) -> Self {
        self.info = self.info.recursive();
        self
    }

    pub(crate) fn keyed(mut self) -> Self {
        self.info = self.info.keyed();
        self
    }

    pub(crate) fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    pub(crate) fn emitting(self, values: &[&'static str]) -> Self {
        self.with_steps(values.iter().map(|v| Step::Found(*v)).collect())
    }

    pub(crate) fn keys_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.keys)
    }

    pub(crate) fn runs_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.runs)
    }
}

impl Source for FakeSource {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn is_default(&self) -> bool {
        self.info.is_default
    }

    fn has_recursive_support(&self) -> bool {
        self.info.has_recursive_support
    }

    fn needs_key(&self) -> bool {
        self.info.needs_key
    }

    fn add_api_keys(&mut self, keys: Vec<String>) {
        self.keys.lock().unwrap().extend(keys);
    }

    fn run(
        &self,
        cancel: CancellationToken,
        _domain: &str,
        session: Arc<dyn ScrapeSession>,
    ) -> ResultStream {
        self.runs.fetch_add(1, Ordering::SeqCst);

        let steps = self.steps.clone();
        let keys = self.keys.lock().unwrap().clone();
        let needs_key = self.info.needs_key;
        let name = self.info.name.clone();

        ResultStream::spawn(&self.info.name, move |emitter| async move {
            if needs_key && session.pick_key(&keys, &name).is_none() {
                return;
            }

            for step in steps {
                match step {
                    Step::Found(value) => {
                        if !emitter.subdomain(value).await {
                            return;
                        }
                    }
                    Step::Fail(message) => {
                        if !emitter.error(message).await {
                            return;
                        }
                    }
                    Step::Sleep(duration) => {
                        tokio::select! {
                            _ = cancel.cancelled() => return,
                            _ = tokio::time::sleep(duration) => {}
                        }
                    }
                    Step::Stall(duration) => tokio::time::sleep(duration).await,
                    Step::UntilCancelled => cancel.cancelled().await,
                }
            }
        })
    }
}

pub(crate) struct FakeSession {
    domain: String,
    keys: KeyRotation,
}

impl FakeSession {
    pub(crate) fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            keys: KeyRotation::new(),
        }
    }
}

#[async_trait]
impl ScrapeSession for FakeSession {
    async fn get_with_headers(
        &self,
        _cancel: &CancellationToken,
        _url: &str,
        _headers: &[(String, String)],
    ) -> Result<HttpResponse, SessionError> {
        Err(SessionError::Network("offline".to_string()))
    }

    fn extract(&self, text: &str) -> Option<String> {
        let text = text.trim().to_lowercase();
        text.ends_with(&format!(".{}", self.domain)).then_some(text)
    }

    fn pick_key(&self, keys: &[String], source: &str) -> Option<String> {
        self.keys.pick(keys, source)
    }
}

#[derive(Default)]
pub(crate) struct FakeSessionFactory {
    fail: bool,
    created: AtomicUsize,
}

impl FakeSessionFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl SessionFactory for FakeSessionFactory {
    fn create(
        &self,
        domain: &str,
        _options: &EnumerationOptions,
    ) -> Result<Arc<dyn ScrapeSession>, SessionError> {
        if self.fail {
            return Err(SessionError::Initialization(
                "invalid proxy URL".to_string(),
            ));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeSession::new(domain)))
    }
}
