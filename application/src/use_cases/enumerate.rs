//! Passive enumeration use case
//!
//! [`PassiveAgent`] runs every selected source concurrently against one
//! domain under one deadline and merges their results into a single stream.
//!
//! # Flow
//!
//! 1. Build a session for the domain. If that fails the stream yields one
//!    error result and closes; no source runs.
//! 2. Arm a cancellation token that fires after `max_enum_time`.
//! 3. Spawn one task per source. Each task forwards its source's results
//!    unmodified and records how long the source took.
//! 4. Wait for every task, log per-source timings, release the token and
//!    only then close the output stream.
//!
//! Results of one source keep their order; interleaving across sources is
//! unspecified. Cancellation is cooperative: a source that ignores the token
//! delays completion but is never aborted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use scout_domain::{EnumerationOptions, ScrapeResult, SourceSelection};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ports::progress::{EnumerationProgress, NoProgress, SourceReport};
use crate::ports::session::{ScrapeSession, SessionFactory};
use crate::ports::source::Source;
use crate::ports::stream::{RESULT_BUFFER, ResultStream};
use crate::registry::SourceRegistry;

/// Source name attached to errors raised by the agent itself
pub const AGENT_SOURCE: &str = "passive";

/// Agent for passive subdomain enumeration
///
/// Holds the resolved, immutable set of sources. A session is built per
/// [`enumerate`](Self::enumerate) call, so one agent can be reused across
/// many target domains.
pub struct PassiveAgent<F: SessionFactory + 'static> {
    factory: Arc<F>,
    sources: Vec<Arc<dyn Source>>,
}

impl<F: SessionFactory + 'static> PassiveAgent<F> {
    /// Resolve `selection` against `registry`. Performs no I/O.
    pub fn new(factory: Arc<F>, registry: &SourceRegistry, selection: &SourceSelection) -> Self {
        let sources = registry.select(selection);
        Self { factory, sources }
    }

    /// The selected sources, sorted by name
    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Enumerate `domain` with default (no-op) progress
    pub fn enumerate(&self, domain: &str, options: &EnumerationOptions) -> ResultStream {
        self.enumerate_with_progress(domain, options, Arc::new(NoProgress))
    }

    /// Enumerate `domain`, reporting per-source completion to `progress`.
    ///
    /// Returns immediately; the work runs on spawned tasks and the returned
    /// stream closes once every source has finished.
    pub fn enumerate_with_progress(
        &self,
        domain: &str,
        options: &EnumerationOptions,
        progress: Arc<dyn EnumerationProgress>,
    ) -> ResultStream {
        let (tx, rx) = mpsc::channel(RESULT_BUFFER);

        let factory = Arc::clone(&self.factory);
        let sources = self.sources.clone();
        let domain = domain.to_string();
        let options = options.clone();

        tokio::spawn(async move {
            let session = match factory.create(&domain, &options) {
                Ok(session) => session,
                Err(e) => {
                    warn!("Could not init passive session for {}: {}", domain, e);
                    let _ = tx
                        .send(ScrapeResult::error(
                            AGENT_SOURCE,
                            format!("could not init passive session for {}: {}", domain, e),
                        ))
                        .await;
                    return;
                }
            };

            info!(
                "Enumerating {} with {} source(s)",
                domain,
                sources.len()
            );
            progress.on_run_start(&domain, sources.len());

            let cancel = CancellationToken::new();
            let deadline = arm_deadline(cancel.clone(), options.max_enum_time);

            let time_taken: Arc<Mutex<HashMap<String, Duration>>> =
                Arc::new(Mutex::new(HashMap::new()));

            let mut join_set = JoinSet::new();

            // Run each source in parallel on the target domain
            for source in sources {
                let task = SourceTask {
                    source,
                    domain: domain.clone(),
                    session: Arc::clone(&session),
                    cancel: cancel.clone(),
                    output: tx.clone(),
                    time_taken: Arc::clone(&time_taken),
                    progress: Arc::clone(&progress),
                };
                join_set.spawn(task.run());
            }

            while let Some(joined) = join_set.join_next().await {
                if let Err(e) = joined {
                    warn!("Source task join error: {}", e);
                }
            }

            let mut timings: Vec<(String, Duration)> = time_taken
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain()
                .collect();
            timings.sort();
            for (source, elapsed) in timings {
                info!(source = %source, "Source took {:?} for enumeration", elapsed);
            }

            deadline.abort();
            cancel.cancel();

            progress.on_run_complete(&domain);
            debug!("Enumeration of {} complete", domain);

            // Output closes here, after every task is joined
            drop(tx);
        });

        ResultStream::new(rx)
    }
}

/// Cancel `cancel` once `max` has elapsed
fn arm_deadline(cancel: CancellationToken, max: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(max) => {
                debug!("Maximum enumeration time of {:?} reached", max);
                cancel.cancel();
            }
        }
    })
}

/// Everything one per-source worker needs
struct SourceTask {
    source: Arc<dyn Source>,
    domain: String,
    session: Arc<dyn ScrapeSession>,
    cancel: CancellationToken,
    output: mpsc::Sender<ScrapeResult>,
    time_taken: Arc<Mutex<HashMap<String, Duration>>>,
    progress: Arc<dyn EnumerationProgress>,
}

impl SourceTask {
    async fn run(self) {
        let started = Instant::now();
        let mut stream = self
            .source
            .run(self.cancel.clone(), &self.domain, Arc::clone(&self.session));

        let mut subdomains = 0;
        let mut errors = 0;

        while let Some(result) = stream.next().await {
            if result.is_error() {
                errors += 1;
            } else {
                subdomains += 1;
            }
            if self.output.send(result).await.is_err() {
                // Consumer went away; dropping the stream stops the source
                debug!(source = self.source.name(), "Result consumer closed");
                break;
            }
        }

        let elapsed = started.elapsed();
        self.time_taken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(self.source.name().to_string(), elapsed);

        self.progress.on_source_complete(&SourceReport {
            source: self.source.name().to_string(),
            elapsed,
            subdomains,
            errors,
        });
    }
}
