//! Veridia Domain - Core SDK types
//!
//! This crate defines the domain model for the Veridia identity-verification
//! SDK. All types here are pure Rust with no I/O dependencies: request
//! descriptors, the multipart form model, access tokens, and the parameter
//! types for each resource endpoint.

pub mod credentials;
pub mod error;
pub mod form;
pub mod request;
pub mod resources;
pub mod response;
pub mod token;

pub use credentials::Credentials;
pub use error::{DomainError, DomainResult};
pub use form::{FormField, MediaFile, UploadForm};
pub use request::{HttpMethod, RequestPayload, validate_identifier, validate_path};
pub use resources::{
    BackUpload, CreateIdentity, DEFAULT_DOCUMENT_TYPE, DocumentField, DocumentSide, FrontUpload,
    WebhookSubscription,
};
pub use response::{ApiResponse, ResponseBody};
pub use token::AccessToken;
