//! ProjectDiscovery Chaos dataset

use std::sync::Arc;

use scout_application::{CancellationToken, ResultStream, ScrapeSession, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChaosResponse {
    #[serde(default)]
    subdomains: Vec<String>,
}

/// Turn the `subdomains` labels of a Chaos payload into full hostnames
fn parse_hosts(body: &str, domain: &str) -> Result<Vec<String>, serde_json::Error> {
    let response: ChaosResponse = serde_json::from_str(body)?;
    Ok(response
        .subdomains
        .into_iter()
        .map(|label| label.trim().trim_start_matches("*.").to_string())
        .filter(|label| !label.is_empty())
        .map(|label| format!("{}.{}", label, domain))
        .collect())
}

/// Chaos API (`dns.projectdiscovery.io`), requires a key
#[derive(Debug, Default)]
pub struct Chaos {
    api_keys: Vec<String>,
}

impl Chaos {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Source for Chaos {
    fn name(&self) -> &str {
        "chaos"
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

        let domain = domain.to_string();
        let url = format!("https://dns.projectdiscovery.io/dns/{}/subdomains", domain);

        ResultStream::spawn(self.name(), move |emitter| async move {
            let headers = [("Authorization".to_string(), key)];
            let response = match session.get_with_headers(&cancel, &url, &headers).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            let hosts = match parse_hosts(&response.body, &domain) {
                Ok(hosts) => hosts,
                Err(e) => {
                    emitter.error(e).await;
                    return;
                }
            };

            for host in hosts {
                if !emitter.subdomain(host).await {
                    return;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::StubSession;
    use scout_domain::ScrapeResult;

    #[test]
    fn test_parse_joins_labels_with_domain() {
        let body = r#"{"domain": "example.com", "subdomains": ["www", "api.dev", "*.cdn"], "count": 3}"#;
        assert_eq!(
            parse_hosts(body, "example.com").unwrap(),
            vec!["www.example.com", "api.dev.example.com", "cdn.example.com"]
        );
    }

    #[test]
    fn test_parse_missing_subdomains_is_empty() {
        assert!(parse_hosts(r#"{"domain": "example.com"}"#, "example.com")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_skips_blank_labels() {
        let body = r#"{"subdomains": ["", "  ", "mx"]}"#;
        assert_eq!(
            parse_hosts(body, "example.com").unwrap(),
            vec!["mx.example.com"]
        );
    }

    #[tokio::test]
    async fn test_without_key_emits_nothing() {
        let session = StubSession::offline("example.com");
        let results = Chaos::new()
            .run(CancellationToken::new(), "example.com", session.clone())
            .collect_all()
            .await;
        assert!(results.is_empty());
        assert!(session.requests().is_empty());
    }

    #[tokio::test]
    async fn test_with_key_sends_authorization_header() {
        let mut source = Chaos::new();
        source.add_api_keys(vec!["secret".to_string()]);
        let session = StubSession::replying("example.com", r#"{"subdomains": ["www"]}"#);
        let results = source
            .run(CancellationToken::new(), "example.com", session.clone())
            .collect_all()
            .await;

        assert_eq!(results, vec![ScrapeResult::subdomain("chaos", "www.example.com")]);
        let requests = session.requests();
        assert_eq!(
            requests[0].url,
            "https://dns.projectdiscovery.io/dns/example.com/subdomains"
        );
        assert_eq!(
            requests[0].headers,
            vec![("Authorization".to_string(), "secret".to_string())]
        );
    }

    #[tokio::test]
    async fn test_transport_error_becomes_error_result() {
        let mut source = Chaos::new();
        source.add_api_keys(vec!["secret".to_string()]);
        let results = source
            .run(
                CancellationToken::new(),
                "example.com",
                StubSession::offline("example.com"),
            )
            .collect_all()
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_error());
        assert_eq!(results[0].source(), "chaos");
    }
}
