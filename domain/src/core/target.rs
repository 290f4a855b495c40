//! Target domain value object

use super::error::DomainError;
use std::fmt;

/// A normalized root domain to enumerate (Value Object)
///
/// Input is trimmed, lower-cased and stripped of a leading `*.` wildcard
/// and a trailing root dot. Anything containing whitespace, a scheme or a
/// path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetDomain(String);

impl TargetDomain {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let name = trimmed
            .strip_prefix("*.")
            .unwrap_or(trimmed)
            .trim_end_matches('.')
            .to_ascii_lowercase();

        if name.is_empty() {
            return Err(DomainError::InvalidDomain("domain is empty".to_string()));
        }

        if name.contains("://") || name.contains('/') {
            return Err(DomainError::InvalidDomain(format!(
                "'{}' looks like a URL, pass the bare domain",
                input.trim()
            )));
        }

        if name.chars().any(char::is_whitespace) || name.starts_with('.') || name.contains("..")
        {
            return Err(DomainError::InvalidDomain(format!(
                "'{}' is not a valid domain name",
                input.trim()
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let domain = TargetDomain::parse("  Example.COM. ").unwrap();
        assert_eq!(domain.as_str(), "example.com");
    }

    #[test]
    fn test_parse_strips_wildcard() {
        let domain = TargetDomain::parse("*.example.com").unwrap();
        assert_eq!(domain.to_string(), "example.com");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(TargetDomain::parse("   ").is_err());
        assert!(TargetDomain::parse(".").is_err());
    }

    #[test]
    fn test_parse_rejects_urls() {
        let err = TargetDomain::parse("https://example.com/path").unwrap_err();
        assert!(err.to_string().contains("looks like a URL"));
    }

    #[test]
    fn test_parse_rejects_malformed_labels() {
        assert!(TargetDomain::parse("exa mple.com").is_err());
        assert!(TargetDomain::parse("example..com").is_err());
        assert!(TargetDomain::parse(".example.com").is_err());
    }
}
