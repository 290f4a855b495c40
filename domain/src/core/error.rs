//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid target domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid enumeration options: {0}")]
    InvalidOptions(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_domain_display() {
        let error = DomainError::InvalidDomain("empty".to_string());
        assert_eq!(error.to_string(), "Invalid target domain: empty");
    }

    #[test]
    fn test_invalid_options_display() {
        let error = DomainError::InvalidOptions("max enumeration time must be > 0".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid enumeration options: max enumeration time must be > 0"
        );
    }
}
