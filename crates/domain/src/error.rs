//! Domain error types

use thiserror::Error;

/// Domain-level errors raised during validation, before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A resource identifier is empty or blank.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// An API path does not start with a leading slash.
    #[error("invalid API path: {0}")]
    InvalidPath(String),

    /// An upload was constructed without the required picture.
    #[error("missing file: {0}")]
    MissingFile(String),

    /// An identity metadata key is empty.
    #[error("invalid metadata key: {0}")]
    InvalidMetadataKey(String),

    /// An upload carries a malformed MIME type.
    #[error("invalid MIME type: {0}")]
    InvalidMimeType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
