//! Source selection criteria
//!
//! [`SourceSelection`] is the human-facing request ("use these sources,
//! skip those"). It is resolved against a registry exactly once when an
//! agent is built:
//!
//! 1. `use_all` starts from every known source
//! 2. otherwise a non-empty `sources` list starts from exactly those names
//! 3. otherwise the default sources are used
//! 4. every name in `excluded` is removed
//! 5. `recursive_only` drops sources without recursive support

use crate::scrape::source_info::normalize_source_name;
use serde::{Deserialize, Serialize};

/// Which sources an agent should run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSelection {
    /// Explicit inclusion list (ignored when `use_all` is set)
    pub sources: Vec<String>,
    /// Names removed after the starting set is chosen
    pub excluded: Vec<String>,
    /// Start from every registered source
    pub use_all: bool,
    /// Keep only sources with recursive support
    pub recursive_only: bool,
}

impl SourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            use_all: true,
            ..Self::default()
        }
    }

    pub fn with_sources<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sources = split_names(names);
        self
    }

    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded = split_names(names);
        self
    }

    pub fn with_all(mut self, use_all: bool) -> Self {
        self.use_all = use_all;
        self
    }

    pub fn with_recursive_only(mut self, recursive_only: bool) -> Self {
        self.recursive_only = recursive_only;
        self
    }

    /// Whether a (case-insensitive) name is in the exclusion list
    pub fn is_excluded(&self, name: &str) -> bool {
        let name = normalize_source_name(name);
        self.excluded.iter().any(|e| *e == name)
    }
}

/// Normalize names, splitting comma-separated entries and dropping blanks.
fn split_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .flat_map(|n| {
            n.as_ref()
                .split(',')
                .map(normalize_source_name)
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = SourceSelection::new();
        assert!(selection.sources.is_empty());
        assert!(selection.excluded.is_empty());
        assert!(!selection.use_all);
        assert!(!selection.recursive_only);
    }

    #[test]
    fn test_names_are_normalized_and_split() {
        let selection = SourceSelection::new()
            .with_sources(["CrtSh, chaos", " ", "DNSRepo"])
            .with_excluded(["Anubis,"]);
        assert_eq!(selection.sources, vec!["crtsh", "chaos", "dnsrepo"]);
        assert_eq!(selection.excluded, vec!["anubis"]);
    }

    #[test]
    fn test_is_excluded_case_insensitive() {
        let selection = SourceSelection::new().with_excluded(["crtsh"]);
        assert!(selection.is_excluded("CRTSH"));
        assert!(!selection.is_excluded("chaos"));
    }

    #[test]
    fn test_all() {
        assert!(SourceSelection::all().use_all);
    }
}
