//! Resource endpoint parameter types
//!
//! Each upload type knows how to turn itself into an [`UploadForm`], so the
//! exact multipart field set is decided (and testable) before the HTTP layer
//! is involved. Validation also happens here: a missing picture or blank
//! identifier fails before any network call is made.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::form::{MediaFile, UploadForm};
use crate::request::validate_identifier;

/// Document type submitted when none is specified.
pub const DEFAULT_DOCUMENT_TYPE: &str = "national-id";

/// A webhook subscription request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    /// The URL verification events are delivered to.
    pub url: String,
    /// The shared secret for the subscription.
    pub secret: String,
}

impl WebhookSubscription {
    /// Creates a new subscription request.
    #[must_use]
    pub fn new(url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secret: secret.into(),
        }
    }
}

/// One manual correction for a document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    /// The field identifier (e.g. `curp`).
    pub id: String,
    /// The corrected value.
    pub value: String,
}

impl DocumentField {
    /// Creates a new field correction.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Which side of a document a picture shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSide {
    /// The front side.
    Front,
    /// The back side.
    Back,
}

impl DocumentSide {
    /// Returns the side as the form-field value the API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

/// Parameters for creating an identity.
///
/// Metadata keys become `metadata[<key>]` form fields, iterated in insertion
/// order; the optional selfie becomes the `photo` part.
#[derive(Debug, Clone, Default)]
pub struct CreateIdentity {
    /// Free-form metadata attached to the identity.
    pub metadata: IndexMap<String, String>,
    /// Optional selfie photo.
    pub selfie: Option<MediaFile>,
}

impl CreateIdentity {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one metadata entry.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attaches the selfie photo.
    #[must_use]
    pub fn selfie(mut self, media: MediaFile) -> Self {
        self.selfie = Some(media);
        self
    }

    /// Builds the multipart form for `POST /v1/identities`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidMetadataKey`] for an empty metadata key.
    pub fn into_form(self) -> DomainResult<UploadForm> {
        let mut form = UploadForm::new();
        for (key, value) in self.metadata {
            if key.trim().is_empty() {
                return Err(DomainError::InvalidMetadataKey(key));
            }
            form = form.text(format!("metadata[{key}]"), value);
        }
        if let Some(selfie) = self.selfie {
            form = form.file("photo", "identity.jpeg", selfie);
        }
        Ok(form)
    }
}

/// Parameters for uploading the front side of a document.
#[derive(Debug, Clone)]
pub struct FrontUpload {
    /// The identity the document belongs to.
    pub identity_id: String,
    /// Document type; defaults to [`DEFAULT_DOCUMENT_TYPE`].
    pub document_type: Option<String>,
    /// The front picture.
    pub picture: Option<MediaFile>,
}

impl FrontUpload {
    /// Creates an upload for the given identity.
    #[must_use]
    pub fn new(identity_id: impl Into<String>) -> Self {
        Self {
            identity_id: identity_id.into(),
            document_type: None,
            picture: None,
        }
    }

    /// Sets the document type.
    #[must_use]
    pub fn document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Attaches the front picture.
    #[must_use]
    pub fn picture(mut self, media: MediaFile) -> Self {
        self.picture = Some(media);
        self
    }

    /// Builds the multipart form for `POST /v1/identities/{id}/documents`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] for a blank identity id and
    /// [`DomainError::MissingFile`] when no picture (or an empty picture) was
    /// attached.
    pub fn into_form(self) -> DomainResult<UploadForm> {
        validate_identifier("identity_id", &self.identity_id)?;
        let picture = require_picture(self.picture)?;

        let document_type = self
            .document_type
            .unwrap_or_else(|| DEFAULT_DOCUMENT_TYPE.to_string());

        Ok(UploadForm::new()
            .text("type", document_type)
            .text("side", DocumentSide::Front.as_str())
            .file("picture", "front.jpeg", picture))
    }
}

/// Parameters for uploading the back side of a document.
#[derive(Debug, Clone)]
pub struct BackUpload {
    /// The document the picture belongs to.
    pub document_id: String,
    /// The back picture.
    pub picture: Option<MediaFile>,
}

impl BackUpload {
    /// Creates an upload for the given document.
    #[must_use]
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            picture: None,
        }
    }

    /// Attaches the back picture.
    #[must_use]
    pub fn picture(mut self, media: MediaFile) -> Self {
        self.picture = Some(media);
        self
    }

    /// Builds the multipart form for `PUT /v1/documents/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] for a blank document id and
    /// [`DomainError::MissingFile`] when no picture (or an empty picture) was
    /// attached.
    pub fn into_form(self) -> DomainResult<UploadForm> {
        validate_identifier("document_id", &self.document_id)?;
        let picture = require_picture(self.picture)?;

        Ok(UploadForm::new()
            .text("side", DocumentSide::Back.as_str())
            .file("picture", "back.jpeg", picture))
    }
}

fn require_picture(picture: Option<MediaFile>) -> DomainResult<MediaFile> {
    match picture {
        Some(media) if !media.is_empty() => Ok(media),
        _ => Err(DomainError::MissingFile("picture".to_string())),
    }
}
