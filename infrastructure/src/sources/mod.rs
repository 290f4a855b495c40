//! Built-in vendor sources
//!
//! Each source lives in its own module and implements
//! [`scout_application::Source`]. [`default_registry`] wires all of them
//! into a [`SourceRegistry`] with API keys from configuration.

mod alienvault;
mod anubis;
mod chaos;
mod crtsh;
mod dnsrepo;
mod hackertarget;
mod waybackarchive;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::HashMap;

use scout_application::{Source, SourceRegistry};

pub use alienvault::AlienVault;
pub use anubis::Anubis;
pub use chaos::Chaos;
pub use crtsh::{CertificateIndex, CertwatchDatabase, CrtSh};
pub use dnsrepo::DnsRepo;
pub use hackertarget::HackerTarget;
pub use waybackarchive::WaybackArchive;

/// Fresh instances of every built-in source
pub fn all_sources() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(AlienVault::new()),
        Box::new(Anubis::new()),
        Box::new(Chaos::new()),
        Box::new(CrtSh::new()),
        Box::new(DnsRepo::new()),
        Box::new(HackerTarget::new()),
        Box::new(WaybackArchive::new()),
    ]
}

/// Registry of every built-in source with `keys` injected by source name
pub fn default_registry(keys: &HashMap<String, Vec<String>>) -> SourceRegistry {
    let mut builder = SourceRegistry::builder().with_key_map(keys);
    for source in all_sources() {
        builder = builder.register_boxed(source);
    }
    builder.build()
}
