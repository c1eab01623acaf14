//! Client credentials

use std::fmt;

/// API credentials supplied at client construction.
///
/// Immutable and owned exclusively by the client instance. The secret is
/// redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The client identifier.
    pub client_id: String,
    /// The client secret.
    pub secret_id: String,
}

impl Credentials {
    /// Creates a new credential pair.
    #[must_use]
    pub fn new(client_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret_id: secret_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret_id", &"<redacted>")
            .finish()
    }
}
