//! Result streams
//!
//! A [`ResultStream`] is the lazy, produce-then-close sequence a source
//! returns from `run` (and the agent returns from `enumerate`). The producing
//! side holds a [`ResultEmitter`]; the stream closes once every emitter for
//! it has been dropped.

use futures::Stream;
use scout_domain::ScrapeResult;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use super::session::SessionError;

/// Buffered results per stream before producers wait on the consumer
pub const RESULT_BUFFER: usize = 256;

/// Receiving half of a result sequence.
///
/// Wraps an `mpsc::Receiver<ScrapeResult>`; also usable as a
/// [`futures::Stream`].
#[derive(Debug)]
pub struct ResultStream {
    receiver: mpsc::Receiver<ScrapeResult>,
}

impl ResultStream {
    pub fn new(receiver: mpsc::Receiver<ScrapeResult>) -> Self {
        Self { receiver }
    }

    /// Create a connected emitter/stream pair for `source`
    pub fn channel(source: &str) -> (ResultEmitter, ResultStream) {
        let (tx, rx) = mpsc::channel(RESULT_BUFFER);
        (ResultEmitter::new(source, tx), ResultStream::new(rx))
    }

    /// Spawn `produce` on the runtime and return the stream it feeds.
    ///
    /// The stream closes when `produce` finishes (or panics) and drops its
    /// emitter.
    pub fn spawn<F, Fut>(source: &str, produce: F) -> Self
    where
        F: FnOnce(ResultEmitter) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (emitter, stream) = Self::channel(source);
        tokio::spawn(produce(emitter));
        stream
    }

    /// A stream that is already closed
    pub fn empty() -> Self {
        let (_, rx) = mpsc::channel(1);
        Self::new(rx)
    }

    /// Receive the next result; `None` once the stream is closed
    pub async fn next(&mut self) -> Option<ScrapeResult> {
        self.receiver.recv().await
    }

    /// Drain the stream until it closes
    pub async fn collect_all(mut self) -> Vec<ScrapeResult> {
        let mut results = Vec::new();
        while let Some(result) = self.receiver.recv().await {
            results.push(result);
        }
        results
    }
}

impl Stream for ResultStream {
    type Item = ScrapeResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Sending half of a result sequence, bound to one source name.
///
/// Every send reports whether the consumer is still listening; a source
/// should stop producing once it returns `false`.
#[derive(Clone)]
pub struct ResultEmitter {
    source: Arc<str>,
    sender: mpsc::Sender<ScrapeResult>,
}

impl ResultEmitter {
    pub fn new(source: &str, sender: mpsc::Sender<ScrapeResult>) -> Self {
        Self {
            source: Arc::from(source),
            sender,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Emit a discovered hostname
    pub async fn subdomain(&self, value: impl Into<String>) -> bool {
        self.emit(ScrapeResult::subdomain(self.source.as_ref(), value))
            .await
    }

    /// Emit an error result
    pub async fn error(&self, error: impl fmt::Display) -> bool {
        self.emit(ScrapeResult::error(self.source.as_ref(), error))
            .await
    }

    /// Emit a session failure; cancellation is swallowed and ends production.
    pub async fn report(&self, error: SessionError) -> bool {
        if error.is_cancelled() {
            return false;
        }
        self.error(error).await
    }

    pub async fn emit(&self, result: ScrapeResult) -> bool {
        self.sender.send(result).await.is_ok()
    }

    /// Whether the consumer has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl fmt::Debug for ResultEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultEmitter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
