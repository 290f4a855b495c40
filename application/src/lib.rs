//! Application layer for subscout
//!
//! This crate contains the source contract, the session port, the source
//! registry and the passive enumeration use case. It depends only on the
//! domain layer.

pub mod ports;
pub mod registry;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use ports::{
    progress::{EnumerationProgress, NoProgress, SourceReport},
    session::{HttpResponse, ScrapeSession, SessionError, SessionFactory},
    source::Source,
    stream::{ResultEmitter, ResultStream},
};
pub use registry::{SourceRegistry, SourceRegistryBuilder};
pub use use_cases::enumerate::{AGENT_SOURCE, PassiveAgent};

// Sources receive the run's cancellation token through the contract
pub use tokio_util::sync::CancellationToken;
