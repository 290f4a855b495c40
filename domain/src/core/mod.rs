//! Core domain concepts shared across all subdomains.
//!
//! - [`target::TargetDomain`]: a normalized root domain to enumerate
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod target;
