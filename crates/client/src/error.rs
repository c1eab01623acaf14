//! SDK error taxonomy

use thiserror::Error;
use veridia_domain::DomainError;

/// Errors surfaced by SDK calls.
///
/// Upstream payloads are preserved verbatim so callers can branch on the
/// status code and inspect the body; nothing is retried or silently
/// recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    /// The credential exchange failed. No partial token is ever stored.
    #[error("credential exchange failed")]
    Authentication {
        /// Upstream status code, if a response was received.
        status: Option<u16>,
        /// Upstream body or transport error description.
        body: Option<String>,
    },

    /// A resource endpoint returned a non-2xx status.
    #[error("API error (status {status})")]
    Api {
        /// The upstream status code.
        status: u16,
        /// The raw upstream error payload.
        body: Vec<u8>,
    },

    /// No response reached the client (DNS failure, connection refused,
    /// timeout).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A required field was missing or malformed before any network call.
    #[error("validation error: {0}")]
    Validation(#[from] DomainError),

    /// A 2xx response declared JSON but could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response body kind did not match what the endpoint returns.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(&'static str),
}

impl Error {
    /// Returns the upstream HTTP status, where one exists.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_accessor() {
        let api = Error::Api {
            status: 404,
            body: Vec::new(),
        };
        assert_eq!(api.status(), Some(404));

        let auth = Error::Authentication {
            status: Some(401),
            body: None,
        };
        assert_eq!(auth.status(), Some(401));

        let validation = Error::Validation(DomainError::MissingFile("picture".to_string()));
        assert_eq!(validation.status(), None);
    }

    #[test]
    fn test_validation_errors_convert_from_domain() {
        let error: Error = DomainError::InvalidPath("x".to_string()).into();
        assert!(matches!(error, Error::Validation(_)));
    }
}
