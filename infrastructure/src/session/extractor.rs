//! Target-domain hostname extraction

use regex::Regex;

/// Pulls hostnames under one root domain out of free-form text.
///
/// Vendor payloads carry names in every shape (bare hosts, URLs, certificate
/// SANs, CSV rows). The extractor matches `[a-z0-9*_.-]+.<domain>`
/// case-insensitively and returns the longest match, lower-cased and with
/// leading wildcard markers removed.
#[derive(Debug, Clone)]
pub struct SubdomainExtractor {
    pattern: Regex,
}

impl SubdomainExtractor {
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?i)[a-z0-9*_.\-]+\.{}",
            regex::escape(domain)
        ))?;
        Ok(Self { pattern })
    }

    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .max_by_key(|m| m.len())
            .map(|m| m.trim_start_matches(['*', '.']).to_lowercase())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SubdomainExtractor {
        SubdomainExtractor::new("example.com").unwrap()
    }

    #[test]
    fn test_plain_hostname() {
        assert_eq!(
            extractor().find("api.example.com").as_deref(),
            Some("api.example.com")
        );
    }

    #[test]
    fn test_extracts_from_url() {
        assert_eq!(
            extractor()
                .find("https://Dev.API.Example.com:8443/login?next=/")
                .as_deref(),
            Some("dev.api.example.com")
        );
    }

    #[test]
    fn test_strips_wildcard() {
        assert_eq!(
            extractor().find("*.cdn.example.com").as_deref(),
            Some("cdn.example.com")
        );
    }

    #[test]
    fn test_picks_longest_match() {
        let text = "a.example.com, deep.nested.host.example.com";
        assert_eq!(
            extractor().find(text).as_deref(),
            Some("deep.nested.host.example.com")
        );
    }

    #[test]
    fn test_rejects_other_domains() {
        assert!(extractor().find("www.example.org").is_none());
        assert!(extractor().find("example.com").is_none());
    }

    #[test]
    fn test_domain_is_escaped() {
        // "." in the domain must not match arbitrary characters
        assert!(extractor().find("www.exampleXcom").is_none());
    }
}
