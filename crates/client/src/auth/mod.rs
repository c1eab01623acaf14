//! Authentication
//!
//! [`TokenExchanger`] is the port for the credential exchange;
//! [`HttpTokenExchanger`] is its reqwest adapter. [`Authenticator`] caches
//! the resulting bearer token and coalesces concurrent refreshes into a
//! single in-flight exchange.

mod authenticator;
mod exchanger;

pub use authenticator::{Authenticator, DEFAULT_EXPIRY_MARGIN_SECS};
pub use exchanger::{HttpTokenExchanger, TokenExchanger};
