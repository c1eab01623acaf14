//! Token cache with single-flight refresh

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};
use veridia_domain::AccessToken;

use crate::auth::TokenExchanger;
use crate::error::{Error, Result};

/// Seconds before expiry at which a token is refreshed rather than reused.
pub const DEFAULT_EXPIRY_MARGIN_SECS: i64 = 30;

/// Outcome of one credential exchange, shared by every caller waiting on it.
type RefreshResult = std::result::Result<AccessToken, Error>;

/// Produces a valid bearer token, transparently refreshing on expiry.
///
/// The cached token is the only mutable state in the SDK. Reads of a
/// still-valid token take a shared lock and make no network call. A refresh
/// is a single shared in-flight operation: the guarded slot holds a handle
/// to the running exchange, and every caller that arrives while it runs
/// waits on that same exchange rather than starting its own. The exchange
/// runs on a detached task, so cancelling any number of waiters neither
/// aborts it nor lets a later waiter start a second one. A failed exchange
/// leaves whatever was cached before untouched.
pub struct Authenticator<E> {
    exchanger: Arc<E>,
    cached: Arc<RwLock<Option<AccessToken>>>,
    in_flight: Arc<Mutex<Option<watch::Receiver<Option<RefreshResult>>>>>,
    margin_secs: i64,
}

impl<E> Clone for Authenticator<E> {
    fn clone(&self) -> Self {
        Self {
            exchanger: Arc::clone(&self.exchanger),
            cached: Arc::clone(&self.cached),
            in_flight: Arc::clone(&self.in_flight),
            margin_secs: self.margin_secs,
        }
    }
}

impl<E: TokenExchanger + 'static> Authenticator<E> {
    /// Creates an authenticator with the default expiry margin.
    #[must_use]
    pub fn new(exchanger: E) -> Self {
        Self {
            exchanger: Arc::new(exchanger),
            cached: Arc::new(RwLock::new(None)),
            in_flight: Arc::new(Mutex::new(None)),
            margin_secs: DEFAULT_EXPIRY_MARGIN_SECS,
        }
    }

    /// Overrides the expiry margin.
    #[must_use]
    pub fn with_expiry_margin(mut self, margin_secs: i64) -> Self {
        self.margin_secs = margin_secs;
        self
    }

    /// Returns a token guaranteed not expired at the moment of return.
    ///
    /// A still-valid cached token is returned without any network call.
    /// Otherwise the caller joins the in-flight exchange if one is running,
    /// or starts one; either way exactly one exchange is in flight at a
    /// time, shared by all waiters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when the exchange fails; the
    /// previous cache contents are left untouched.
    pub async fn token(&self) -> Result<AccessToken> {
        if let Some(token) = self.cached_valid().await {
            return Ok(token);
        }

        let mut refresh = {
            let mut in_flight = self.in_flight.lock().await;

            // A refresh may have completed while this caller queued.
            if let Some(token) = self.cached_valid().await {
                return Ok(token);
            }

            if let Some(refresh) = in_flight.as_ref() {
                refresh.clone()
            } else {
                tracing::debug!("access token absent or expired, refreshing");
                let refresh = self.start_refresh();
                *in_flight = Some(refresh.clone());
                refresh
            }
        };

        match refresh.wait_for(Option::is_some).await {
            Ok(outcome) => match outcome.as_ref() {
                Some(result) => share_result(result),
                None => Err(refresh_task_failed()),
            },
            Err(_) => Err(refresh_task_failed()),
        }
    }

    /// Returns the cached token, valid or not, without refreshing.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.cached.read().await.clone()
    }

    /// Drops the cached token; the next call performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Spawns the exchange on a detached task and returns a handle every
    /// waiter can share. The task installs the token, vacates the in-flight
    /// slot, and only then publishes its result, so a slot holding a handle
    /// always refers to an exchange that is still running.
    fn start_refresh(&self) -> watch::Receiver<Option<RefreshResult>> {
        let (sender, receiver) = watch::channel(None);
        let exchanger = Arc::clone(&self.exchanger);
        let cached = Arc::clone(&self.cached);
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            let result = exchanger.exchange().await;
            if let Ok(token) = &result {
                *cached.write().await = Some(token.clone());
            }
            *in_flight.lock().await = None;
            let _ = sender.send(Some(result));
        });

        receiver
    }

    async fn cached_valid(&self) -> Option<AccessToken> {
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|token| !token.is_expired_within(self.margin_secs))
            .cloned()
    }
}

/// Hands each waiter its own copy of the shared exchange outcome.
fn share_result(result: &RefreshResult) -> Result<AccessToken> {
    match result {
        Ok(token) => Ok(token.clone()),
        Err(Error::Authentication { status, body }) => Err(Error::Authentication {
            status: *status,
            body: body.clone(),
        }),
        Err(other) => Err(Error::Authentication {
            status: other.status(),
            body: Some(other.to_string()),
        }),
    }
}

fn refresh_task_failed() -> Error {
    Error::Authentication {
        status: None,
        body: Some("token refresh task failed".to_string()),
    }
}
