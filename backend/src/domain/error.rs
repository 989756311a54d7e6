//! Domain Layer - Errors
//!
//! One taxonomy shared by the domain, the repositories and the commands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The content backend could not be reached or refused the request.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_format(detail: impl std::fmt::Display) -> Self {
        DomainError::InvalidInput(format!("invalid format: {}", detail))
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<base64::DecodeError> for DomainError {
    fn from(err: base64::DecodeError) -> Self {
        DomainError::InvalidInput(format!("Failed to decode base64: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_taxonomy() {
        assert_eq!(DomainError::NotFound("tab x".into()).to_string(), "Not found: tab x");
        assert_eq!(
            DomainError::invalid_format("missing tabsData").to_string(),
            "Invalid input: invalid format: missing tabsData"
        );
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let err: DomainError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }
}
