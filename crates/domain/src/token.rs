//! Bearer access token with expiry tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bearer token obtained from the credential exchange.
///
/// Replacement is wholesale: an expired token is discarded and a fresh one
/// installed in a single step, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The access token string.
    pub value: String,
    /// When the token expires, if the exchange reported a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
    /// When this token was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token from an exchange response, stamping the current time.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_in_secs: Option<u64>) -> Self {
        let now = Utc::now();
        let expires_at =
            expires_in_secs.map(|secs| now + chrono::Duration::seconds(secs.cast_signed()));

        Self {
            value: value.into(),
            expires_at,
            obtained_at: now,
        }
    }

    /// Checks whether the token is expired, or will expire within the given
    /// margin. Tokens without a reported lifetime never expire.
    #[must_use]
    pub fn is_expired_within(&self, margin_secs: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            Utc::now() + chrono::Duration::seconds(margin_secs) >= expires_at
        })
    }

    /// Time until expiry in seconds, or `None` if no expiry.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|exp| (exp - Utc::now()).num_seconds())
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fresh_token_is_not_expired() {
        let token = AccessToken::new("abc", Some(3600));
        assert!(!token.is_expired_within(0));
        assert!(token.seconds_until_expiry().unwrap() > 3500);
    }

    #[test]
    fn test_zero_lifetime_token_is_expired() {
        let token = AccessToken::new("abc", Some(0));
        assert!(token.is_expired_within(0));
    }

    #[test]
    fn test_margin_treats_expiring_token_as_expired() {
        let token = AccessToken::new("abc", Some(10));
        assert!(!token.is_expired_within(0));
        assert!(token.is_expired_within(60));
    }

    #[test]
    fn test_token_without_lifetime_never_expires() {
        let token = AccessToken::new("abc", None);
        assert!(!token.is_expired_within(i64::from(i32::MAX)));
        assert_eq!(token.seconds_until_expiry(), None);
    }

    #[test]
    fn test_authorization_header() {
        let token = AccessToken::new("abc123", Some(3600));
        assert_eq!(token.authorization_header(), "Bearer abc123");
    }
}
