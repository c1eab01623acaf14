//! Request descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};
use crate::form::UploadForm;

/// The HTTP verbs used by the verification API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
}

impl HttpMethod {
    /// Returns whether this method carries a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The body of one outbound request.
///
/// Constructed per call, immutable, discarded once the call completes.
#[derive(Debug, Clone, Default)]
pub enum RequestPayload {
    /// No body.
    #[default]
    None,
    /// A JSON body, serialized with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// A multipart form, used for selfie and document uploads.
    Multipart(UploadForm),
}

impl RequestPayload {
    /// Returns whether the payload is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// Validates a relative API path.
///
/// # Errors
///
/// Returns [`DomainError::InvalidPath`] when the path is empty or does not
/// start with a leading slash.
pub fn validate_path(path: &str) -> DomainResult<()> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(DomainError::InvalidPath(path.to_string()))
    }
}

/// Validates a resource identifier before it is interpolated into a path.
///
/// # Errors
///
/// Returns [`DomainError::InvalidIdentifier`] when the identifier is empty or
/// blank, naming the parameter for the caller.
pub fn validate_identifier(name: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::InvalidIdentifier(name.to_string()))
    } else {
        Ok(())
    }
}
