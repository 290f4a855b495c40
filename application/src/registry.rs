//! Source Registry
//!
//! The [`SourceRegistry`] is the catalog of every known [`Source`], keyed by
//! lower-cased name. It is built exactly once at startup through
//! [`SourceRegistryBuilder`] and is read-only afterwards, so it can be shared
//! across tasks without locking.
//!
//! # Usage
//!
//! ```ignore
//! let registry = SourceRegistry::builder()
//!     .with_api_keys("chaos", vec!["key".into()])
//!     .register(CrtSh::new())
//!     .register(Chaos::new())
//!     .build();
//!
//! let sources = registry.select(&SourceSelection::new().with_excluded(["crtsh"]));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use scout_domain::{SourceInfo, SourceSelection, normalize_source_name};
use tracing::{debug, warn};

use crate::ports::source::Source;

/// Immutable catalog of sources
pub struct SourceRegistry {
    /// Sources in registration order
    sources: Vec<Arc<dyn Source>>,
    /// Lower-cased name -> source
    by_name: HashMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    pub fn builder() -> SourceRegistryBuilder {
        SourceRegistryBuilder::new()
    }

    /// Look up a source by (case-insensitive) name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Source>> {
        self.by_name.get(&normalize_source_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every registered source, in registration order
    pub fn all(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Capability snapshots of every source, sorted by name
    pub fn infos(&self) -> Vec<SourceInfo> {
        let mut infos: Vec<_> = self.sources.iter().map(|s| s.info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve a selection into a concrete, duplicate-free set of sources.
    ///
    /// Steps are applied in order: starting set (all / explicit / defaults),
    /// exclusions, then the recursive-only filter. Unknown names in the
    /// explicit list are logged and skipped. The result is sorted by name.
    pub fn select(&self, selection: &SourceSelection) -> Vec<Arc<dyn Source>> {
        let mut selected: BTreeMap<String, Arc<dyn Source>> = BTreeMap::new();

        if selection.use_all {
            for (name, source) in &self.by_name {
                selected.insert(name.clone(), Arc::clone(source));
            }
        } else if !selection.sources.is_empty() {
            for name in &selection.sources {
                let key = normalize_source_name(name);
                match self.by_name.get(&key) {
                    Some(source) => {
                        selected.insert(key, Arc::clone(source));
                    }
                    None => warn!("There is no source with the name: '{}'", name),
                }
            }
        } else {
            for (name, source) in &self.by_name {
                if source.is_default() {
                    selected.insert(name.clone(), Arc::clone(source));
                }
            }
        }

        for name in &selection.excluded {
            selected.remove(&normalize_source_name(name));
        }

        if selection.recursive_only {
            selected.retain(|_, source| source.has_recursive_support());
        }

        debug!(
            "Selected source(s) for this search: {}",
            selected.keys().cloned().collect::<Vec<_>>().join(", ")
        );

        selected.into_values().collect()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.names())
            .finish()
    }
}

/// One-shot builder for [`SourceRegistry`]
#[derive(Default)]
pub struct SourceRegistryBuilder {
    sources: Vec<Box<dyn Source>>,
    keys: HashMap<String, Vec<String>>,
}

impl SourceRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source
    pub fn register<S: Source + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Register a boxed source
    pub fn register_boxed(mut self, source: Box<dyn Source>) -> Self {
        self.sources.push(source);
        self
    }

    /// API keys to inject into the source called `name` at build time
    pub fn with_api_keys(mut self, name: &str, keys: Vec<String>) -> Self {
        self.keys
            .entry(normalize_source_name(name))
            .or_default()
            .extend(keys);
        self
    }

    /// API keys for several sources at once
    pub fn with_key_map(mut self, keys: &HashMap<String, Vec<String>>) -> Self {
        for (name, values) in keys {
            self = self.with_api_keys(name, values.clone());
        }
        self
    }

    /// Inject keys and freeze the registry.
    ///
    /// A second source with an already registered name is skipped with a
    /// warning; the first registration wins.
    pub fn build(self) -> SourceRegistry {
        let mut sources: Vec<Arc<dyn Source>> = Vec::with_capacity(self.sources.len());
        let mut by_name: HashMap<String, Arc<dyn Source>> = HashMap::new();

        for mut source in self.sources {
            let name = normalize_source_name(source.name());
            if by_name.contains_key(&name) {
                warn!("Duplicate source '{}' ignored", name);
                continue;
            }

            if let Some(keys) = self.keys.get(&name) {
                source.add_api_keys(keys.clone());
            }

            let source: Arc<dyn Source> = Arc::from(source);
            by_name.insert(name, Arc::clone(&source));
            sources.push(source);
        }

        for name in self.keys.keys() {
            if !by_name.contains_key(name) {
                warn!("API keys configured for unknown source '{}'", name);
            }
        }

        SourceRegistry { sources, by_name }
    }
}
