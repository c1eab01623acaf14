//! # Veridia SDK
//!
//! Client SDK for the Veridia identity-verification REST API: webhook
//! management, identity creation, document upload, and verification-data
//! retrieval. Every method maps one call to one HTTP request; there is no
//! retry policy, caching, or pagination handling at this layer.
//!
//! Authentication is transparent. The client exchanges its credentials for a
//! bearer token on first use and refreshes it on expiry; concurrent callers
//! hitting an expired token share a single in-flight exchange.
//!
//! ## Example
//!
//! ```no_run
//! use veridia_sdk::{ApiClient, CreateIdentity, Credentials, FrontUpload, read_media};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(Credentials::new("client-id", "secret-id"));
//!
//!     let identity = client
//!         .create_identity(
//!             CreateIdentity::new()
//!                 .metadata("internal_ref", "case-42")
//!                 .selfie(read_media("selfie.png").await?),
//!         )
//!         .await?;
//!
//!     let identity_id = identity["_id"].as_str().unwrap_or_default();
//!     client
//!         .upload_id_front(
//!             FrontUpload::new(identity_id).picture(read_media("front.jpg").await?),
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod media;

pub use api::ApiClient;
pub use auth::{Authenticator, HttpTokenExchanger, TokenExchanger};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::RequestDispatcher;
pub use media::read_media;

pub use veridia_domain::{
    AccessToken, ApiResponse, BackUpload, CreateIdentity, Credentials, DEFAULT_DOCUMENT_TYPE,
    DocumentField, DocumentSide, FormField, FrontUpload, HttpMethod, MediaFile, RequestPayload,
    ResponseBody, UploadForm, WebhookSubscription,
};
