//! HackerTarget host search

use std::sync::Arc;

use scout_application::{CancellationToken, ResultStream, ScrapeSession, Source};

/// Free-tier API answers 200 with a plain-text error body
fn api_error(body: &str) -> Option<&str> {
    let body = body.trim();
    if body.starts_with("error") || body.contains("API count exceeded") {
        Some(body)
    } else {
        None
    }
}

/// HackerTarget `hostsearch` (`host,ip` CSV lines)
#[derive(Debug, Default)]
pub struct HackerTarget;

impl HackerTarget {
    pub fn new() -> Self {
        Self
    }
}

impl Source for HackerTarget {
    fn name(&self) -> &str {
        "hackertarget"
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
        let url = format!("https://api.hackertarget.com/hostsearch/?q={}", domain);

        ResultStream::spawn(self.name(), move |emitter| async move {
            let response = match session.simple_get(&cancel, &url).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            if let Some(message) = api_error(&response.body) {
                emitter.error(message).await;
                return;
            }

            for line in response.lines() {
                let host = line.split(',').next().unwrap_or(line);
                if let Some(subdomain) = session.extract(host)
                    && !emitter.subdomain(subdomain).await
                {
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

    #[test]
    fn test_api_error_detection() {
        assert_eq!(
            api_error("error check your search parameter"),
            Some("error check your search parameter")
        );
        assert!(api_error("API count exceeded - Increase Quota with Membership").is_some());
        assert!(api_error("www.example.com,93.184.216.34").is_none());
    }

    #[tokio::test]
    async fn test_run_parses_csv() {
        let body = "www.example.com,93.184.216.34\nmail.example.com,10.0.0.1\n\nbogus.org,1.1.1.1\n";
        let session = StubSession::replying("example.com", body);

        let values: Vec<String> = HackerTarget::new()
            .run(CancellationToken::new(), "example.com", session)
            .collect_all()
            .await
            .iter()
            .filter_map(|r| r.value().map(str::to_string))
            .collect();

        assert_eq!(values, vec!["www.example.com", "mail.example.com"]);
    }

    #[tokio::test]
    async fn test_run_reports_quota_message() {
        let session = StubSession::replying("example.com", "API count exceeded");
        let results = HackerTarget::new()
            .run(CancellationToken::new(), "example.com", session)
            .collect_all()
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].error_message(), Some("API count exceeded"));
    }
}
