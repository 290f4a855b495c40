//! Source port
//!
//! This module defines the [`Source`] trait, the contract every external
//! subdomain data provider implements so the agent never special-cases one.
//!
//! # Contract
//!
//! - `run` starts querying and returns immediately with a [`ResultStream`].
//!   The stream yields zero or more subdomain and error results in any order
//!   and closes exactly once.
//! - Production must stop promptly once the cancellation token fires: no new
//!   requests are started and the stream closes.
//! - A source that cannot operate (e.g. no API key configured) emits nothing
//!   and closes cleanly. A missing key is a coverage gap, not a failure.
//! - Capability flags are constant for the lifetime of the instance.
//!
//! # Example
//!
//! ```ignore
//! struct HackerTarget;
//!
//! impl Source for HackerTarget {
//!     fn name(&self) -> &str { "hackertarget" }
//!     fn is_default(&self) -> bool { true }
//!     fn has_recursive_support(&self) -> bool { true }
//!     fn needs_key(&self) -> bool { false }
//!     fn add_api_keys(&mut self, _keys: Vec<String>) {}
//!
//!     fn run(&self, cancel: CancellationToken, domain: &str, session: Arc<dyn ScrapeSession>) -> ResultStream {
//!         let url = format!("https://api.hackertarget.com/hostsearch/?q={domain}");
//!         ResultStream::spawn(self.name(), move |emitter| async move {
//!             match session.simple_get(&cancel, &url).await {
//!                 Ok(response) => { /* parse and emit */ }
//!                 Err(e) => { emitter.report(e).await; }
//!             }
//!         })
//!     }
//! }
//! ```

use super::session::ScrapeSession;
use super::stream::ResultStream;
use scout_domain::SourceInfo;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A pluggable subdomain data provider
pub trait Source: Send + Sync {
    /// Unique identifier (case-insensitive), e.g. "crtsh", "chaos"
    fn name(&self) -> &str;

    /// Included when no explicit selection is given
    fn is_default(&self) -> bool;

    /// Output is suitable for feeding recursive enumeration passes
    fn has_recursive_support(&self) -> bool;

    /// Requires at least one API key to produce anything
    fn needs_key(&self) -> bool;

    /// Inject API keys.
    ///
    /// Called once while the registry is built, before any `run`. Keyless
    /// sources ignore it.
    fn add_api_keys(&mut self, keys: Vec<String>);

    /// Start enumerating `domain` through `session`.
    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn ScrapeSession>,
    ) -> ResultStream;

    /// Snapshot of the capability flags
    fn info(&self) -> SourceInfo {
        SourceInfo {
            name: scout_domain::normalize_source_name(self.name()),
            is_default: self.is_default(),
            has_recursive_support: self.has_recursive_support(),
            needs_key: self.needs_key(),
        }
    }
}
