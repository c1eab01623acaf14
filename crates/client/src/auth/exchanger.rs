//! Credential exchange

use std::future::Future;

use serde::Deserialize;
use veridia_domain::{AccessToken, Credentials};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Port for exchanging client credentials for a bearer token.
///
/// Abstracting the exchange keeps the [`Authenticator`](crate::Authenticator)
/// independent of the HTTP stack and testable with a scripted implementation.
pub trait TokenExchanger: Send + Sync {
    /// Performs one credential exchange and returns a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when the exchange fails, carrying
    /// the upstream status and body when a response was received.
    fn exchange(&self) -> impl Future<Output = Result<AccessToken>> + Send;
}

/// Token response from the authentication endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Reqwest-based token exchange against the API's token endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    http: reqwest::Client,
    token_url: String,
    credentials: Credentials,
}

impl HttpTokenExchanger {
    /// Creates an exchanger for the given configuration and credentials.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ClientConfig, credentials: Credentials) -> Self {
        Self {
            http,
            token_url: config.token_url(),
            credentials,
        }
    }

    async fn request_token(&self) -> Result<AccessToken> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.secret_id.as_str()),
        ];

        let body = serde_urlencoded::to_string(params).map_err(|e| Error::Authentication {
            status: None,
            body: Some(format!("failed to encode form: {e}")),
        })?;

        tracing::debug!(url = %self.token_url, "exchanging credentials for a token");

        let response = self
            .http
            .post(self.token_url.as_str())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e: reqwest::Error| Error::Authentication {
                status: None,
                body: Some(e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "credential exchange rejected");
            return Err(Error::Authentication {
                status: Some(status.as_u16()),
                body: Some(error_text),
            });
        }

        let token_response: TokenResponse =
            response
                .json()
                .await
                .map_err(|e: reqwest::Error| Error::Authentication {
                    status: Some(status.as_u16()),
                    body: Some(format!("failed to parse token response: {e}")),
                })?;

        Ok(AccessToken::new(
            token_response.access_token,
            token_response.expires_in,
        ))
    }
}

impl TokenExchanger for HttpTokenExchanger {
    fn exchange(&self) -> impl Future<Output = Result<AccessToken>> + Send {
        self.request_token()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use url::Url;

    #[test]
    fn test_token_url_built_from_config() {
        let config = ClientConfig::new()
            .with_base_url(Url::parse("http://127.0.0.1:9/").unwrap())
            .with_token_path("/oauth");
        let exchanger = HttpTokenExchanger::new(
            reqwest::Client::new(),
            &config,
            Credentials::new("id", "secret"),
        );
        assert_eq!(exchanger.token_url, "http://127.0.0.1:9/oauth");
    }

    #[test]
    fn test_token_response_parses_without_expiry() {
        let parsed: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.expires_in, None);
    }
}
