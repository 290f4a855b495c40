//! DNSRepo passive DNS search

use std::sync::Arc;

use scout_application::{CancellationToken, ResultStream, ScrapeSession, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DnsRepoRecord {
    #[serde(alias = "Domain", default)]
    domain: String,
}

/// Hostnames from a DNSRepo payload, FQDN dot removed
fn parse_hosts(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let records: Vec<DnsRepoRecord> = serde_json::from_str(body)?;
    Ok(records
        .into_iter()
        .map(|r| r.domain.trim().trim_end_matches('.').to_string())
        .filter(|d| !d.is_empty())
        .collect())
}

/// `dnsrepo.noc.org` API, requires a key
#[derive(Debug, Default)]
pub struct DnsRepo {
    api_keys: Vec<String>,
}

impl DnsRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Source for DnsRepo {
    fn name(&self) -> &str {
        "dnsrepo"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn has_recursive_support(&self) -> bool {
        false
    }

    fn needs_key(&self) -> bool {
        true
    }

    fn add_api_keys(&mut self, keys: Vec<String>) {
        self.api_keys = keys;
    }

    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn ScrapeSession>,
    ) -> ResultStream {
        let Some(key) = session.pick_key(&self.api_keys, self.name()) else {
            return ResultStream::empty();
        };

        let url = format!(
            "https://dnsrepo.noc.org/api/?apikey={}&search={}",
            key, domain
        );

        ResultStream::spawn(self.name(), move |emitter| async move {
            let response = match session.simple_get(&cancel, &url).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            match parse_hosts(&response.body) {
                Ok(hosts) => {
                    for host in hosts {
                        if !emitter.subdomain(host).await {
                            return;
                        }
                    }
                }
                Err(e) => {
                    emitter.error(e).await;
                }
            }
        })
    }
}
