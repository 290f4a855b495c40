//! Infrastructure layer for subscout
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the reqwest-backed scrape session, the
//! built-in vendor sources and configuration file loading.

pub mod config;
pub mod session;
pub mod sources;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEnumerationConfig, FileSourcesConfig,
};
pub use session::{HttpSession, HttpSessionFactory, SubdomainExtractor, USER_AGENT};
pub use sources::{all_sources, default_registry};
