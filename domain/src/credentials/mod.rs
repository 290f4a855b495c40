//! Credential handling shared by keyed sources.

pub mod rotation;
