//! AlienVault OTX passive DNS

use std::sync::Arc;

use scout_application::{CancellationToken, ResultStream, ScrapeSession, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PassiveDnsResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    passive_dns: Vec<PassiveDnsRecord>,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsRecord {
    #[serde(default)]
    hostname: String,
}

/// Hostnames from an OTX payload, or the API-reported error
fn parse_hosts(body: &str) -> Result<Result<Vec<String>, String>, serde_json::Error> {
    let response: PassiveDnsResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error.filter(|e| !e.is_empty()) {
        let detail = response.detail.unwrap_or_default();
        return Ok(Err(format!("{}, {}", detail, error)));
    }

    Ok(Ok(response
        .passive_dns
        .into_iter()
        .map(|r| r.hostname)
        .filter(|h| !h.is_empty())
        .collect()))
}

/// `otx.alienvault.com` passive DNS indicators
#[derive(Debug, Default)]
pub struct AlienVault;

impl AlienVault {
    pub fn new() -> Self {
        Self
    }
}

impl Source for AlienVault {
    fn name(&self) -> &str {
        "alienvault"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn has_recursive_support(&self) -> bool {
        true
    }

    fn needs_key(&self) -> bool {
        false
    }

    fn add_api_keys(&mut self, _keys: Vec<String>) {}

    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn ScrapeSession>,
    ) -> ResultStream {
        let url = format!(
            "https://otx.alienvault.com/api/v1/indicators/domain/{}/passive_dns",
            domain
        );

        ResultStream::spawn(self.name(), move |emitter| async move {
            let response = match session.simple_get(&cancel, &url).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            let hosts = match parse_hosts(&response.body) {
                Ok(Ok(hosts)) => hosts,
                Ok(Err(message)) => {
                    emitter.error(message).await;
                    return;
                }
                Err(e) => {
                    emitter.error(e).await;
                    return;
                }
            };

            for host in hosts {
                if let Some(subdomain) = session.extract(&host)
                    && !emitter.subdomain(subdomain).await
                {
                    return;
                }
            }
        })
    }
}
