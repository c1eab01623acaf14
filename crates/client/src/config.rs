//! Client configuration

use url::Url;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.veridia.com";

/// Default path of the token endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "/oauth";

/// Configuration for an [`ApiClient`](crate::ApiClient).
///
/// The defaults point at the production API host; tests override the base
/// URL to target a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API host.
    pub base_url: Url,
    /// Relative path of the token endpoint.
    pub token_path: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            token_path: DEFAULT_TOKEN_PATH.to_string(),
            user_agent: format!("veridia-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Overrides the token endpoint path.
    #[must_use]
    pub fn with_token_path(mut self, token_path: impl Into<String>) -> Self {
        self.token_path = token_path.into();
        self
    }

    /// Returns the base URL as a string without a trailing slash, ready for
    /// path concatenation.
    #[must_use]
    pub fn base(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// Returns the absolute URL of the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base(), self.token_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base(), "https://api.veridia.com");
        assert_eq!(config.token_url(), "https://api.veridia.com/oauth");
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_base_strips_trailing_slash() {
        let config = ClientConfig::new()
            .with_base_url(Url::parse("http://127.0.0.1:8080/").unwrap());
        assert_eq!(config.base(), "http://127.0.0.1:8080");
        assert_eq!(config.token_url(), "http://127.0.0.1:8080/oauth");
    }
}
