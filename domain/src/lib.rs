//! Domain layer for subscout
//!
//! This crate contains the value objects shared by every layer. It has no
//! dependencies on transport, runtime or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sources and results
//!
//! A *source* is one external provider of subdomain data (certificate
//! transparency logs, passive DNS archives, web archives, ...). Every source
//! describes itself with a [`SourceInfo`] and produces a sequence of
//! [`ScrapeResult`]s, each tagged with the source's name.
//!
//! ## Selection
//!
//! A [`SourceSelection`] says which sources to run; it is resolved once
//! against the registry when an agent is built.
//!
//! ## Runs
//!
//! [`EnumerationOptions`] carry the proxy, rate limit, per-request timeout
//! and overall deadline of a single enumeration run.

pub mod core;
pub mod credentials;
pub mod enumeration;
pub mod scrape;

// Re-export commonly used types
pub use core::{error::DomainError, target::TargetDomain};
pub use credentials::rotation::KeyRotation;
pub use enumeration::{
    options::{DEFAULT_MAX_ENUM_TIME, DEFAULT_TIMEOUT, EnumerationOptions},
    selection::SourceSelection,
};
pub use scrape::{
    result::ScrapeResult,
    source_info::{SourceInfo, normalize_source_name},
};
