//! The API client facade
//!
//! `ApiClient` composes an [`Authenticator`] and a [`RequestDispatcher`] and
//! exposes the resource endpoints as thin methods: each one validates its
//! inputs, builds a path and payload, and delegates to `send`. Upstream
//! payloads are schemaless, so JSON endpoints return `serde_json::Value`.

use std::sync::Arc;

use serde_json::Value;
use veridia_domain::{
    BackUpload, CreateIdentity, Credentials, DocumentField, FrontUpload, HttpMethod,
    RequestPayload, UploadForm, WebhookSubscription, validate_identifier,
};

use crate::auth::{Authenticator, HttpTokenExchanger, TokenExchanger};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::RequestDispatcher;

/// Client for the Veridia identity-verification API.
///
/// Holds the credentials' token cache for its own lifetime; there is no
/// process-wide state. Cloning is cheap and shares the cache.
pub struct ApiClient<E = HttpTokenExchanger> {
    dispatcher: Arc<RequestDispatcher<E>>,
}

impl<E> Clone for ApiClient<E> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl ApiClient<HttpTokenExchanger> {
    /// Creates a client for the production API host.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Creates a client with a custom configuration.
    #[must_use]
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let exchanger = HttpTokenExchanger::new(http.clone(), &config, credentials);
        let authenticator = Authenticator::new(exchanger);
        let dispatcher = RequestDispatcher::new(http, &config.base_url, authenticator);

        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl<E: TokenExchanger + 'static> ApiClient<E> {
    /// Creates a webhook subscription.
    ///
    /// # Errors
    ///
    /// See [`Error`] for the failure taxonomy shared by all methods.
    pub async fn subscribe_webhook(&self, subscription: &WebhookSubscription) -> Result<Value> {
        let body = serde_json::to_value(subscription)?;
        self.send_json(HttpMethod::Post, "/v1/webhooks".to_string(), body)
            .await
    }

    /// Fetches a single webhook subscription by id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn webhook(&self, webhook_id: &str) -> Result<Value> {
        validate_identifier("webhook_id", webhook_id)?;
        self.get_json(format!("/v1/webhooks/{webhook_id}")).await
    }

    /// Lists all webhook subscriptions.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    pub async fn list_webhooks(&self) -> Result<Value> {
        self.get_json("/v1/webhooks".to_string()).await
    }

    /// Deletes a webhook subscription by id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<Value> {
        validate_identifier("webhook_id", webhook_id)?;
        self.request_json(
            HttpMethod::Delete,
            format!("/v1/webhooks/{webhook_id}"),
            RequestPayload::None,
        )
        .await
    }

    /// Creates a new identity from metadata and an optional selfie.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for an empty metadata key.
    pub async fn create_identity(&self, request: CreateIdentity) -> Result<Value> {
        let form = request.into_form()?;
        self.send_multipart(HttpMethod::Post, "/v1/identities".to_string(), form)
            .await
    }

    /// Lists all identities.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    pub async fn list_identities(&self) -> Result<Value> {
        self.get_json("/v1/identities".to_string()).await
    }

    /// Fetches a single identity by id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn identity(&self, identity_id: &str) -> Result<Value> {
        validate_identifier("identity_id", identity_id)?;
        self.get_json(format!("/v1/identities/{identity_id}")).await
    }

    /// Uploads the front picture of a document.
    ///
    /// The document type defaults to `national-id` and the side is `front`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any network call when the
    /// picture is missing or the identity id is blank.
    pub async fn upload_id_front(&self, upload: FrontUpload) -> Result<Value> {
        let identity_id = upload.identity_id.clone();
        let form = upload.into_form()?;
        self.send_multipart(
            HttpMethod::Post,
            format!("/v1/identities/{identity_id}/documents"),
            form,
        )
        .await
    }

    /// Uploads the back picture of a document.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any network call when the
    /// picture is missing or the document id is blank.
    pub async fn upload_id_back(&self, upload: BackUpload) -> Result<Value> {
        let document_id = upload.document_id.clone();
        let form = upload.into_form()?;
        self.send_multipart(HttpMethod::Put, format!("/v1/documents/{document_id}"), form)
            .await
    }

    /// Overwrites document fields with manual corrections.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn update_fields(
        &self,
        document_id: &str,
        fields: &[DocumentField],
    ) -> Result<Value> {
        validate_identifier("document_id", document_id)?;
        let body = serde_json::to_value(fields)?;
        self.send_json(
            HttpMethod::Patch,
            format!("/v1/documents/{document_id}"),
            body,
        )
        .await
    }

    /// Lists all documents of an identity.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn list_documents(&self, identity_id: &str) -> Result<Value> {
        validate_identifier("identity_id", identity_id)?;
        self.get_json(format!("/v1/identities/{identity_id}/documents"))
            .await
    }

    /// Fetches a single document by id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn document(&self, document_id: &str) -> Result<Value> {
        validate_identifier("document_id", document_id)?;
        self.get_json(format!("/v1/documents/{document_id}")).await
    }

    /// Fetches the verified data extracted from a document.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn verified_data(&self, document_id: &str) -> Result<Value> {
        validate_identifier("document_id", document_id)?;
        self.get_json(format!("/v1/documents/{document_id}/verified-data"))
            .await
    }

    /// Lists the pictures attached to a document.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn list_pictures(&self, document_id: &str) -> Result<Value> {
        validate_identifier("document_id", document_id)?;
        self.get_json(format!("/v1/documents/{document_id}/pictures"))
            .await
    }

    /// Fetches picture details by id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id.
    pub async fn picture(&self, picture_id: &str) -> Result<Value> {
        validate_identifier("picture_id", picture_id)?;
        self.get_json(format!("/v1/pictures/{picture_id}")).await
    }

    /// Downloads the raw image bytes of a picture.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] for a blank id and
    /// [`Error::UnexpectedBody`] if the endpoint returns JSON.
    pub async fn download_picture(&self, picture_id: &str) -> Result<Vec<u8>> {
        validate_identifier("picture_id", picture_id)?;
        let response = self
            .dispatcher
            .send(
                HttpMethod::Get,
                &format!("/v1/pictures/{picture_id}.jpg"),
                RequestPayload::None,
            )
            .await?;
        response
            .into_bytes()
            .ok_or(Error::UnexpectedBody("expected a binary response"))
    }

    async fn get_json(&self, path: String) -> Result<Value> {
        self.request_json(HttpMethod::Get, path, RequestPayload::None)
            .await
    }

    async fn send_json(&self, method: HttpMethod, path: String, body: Value) -> Result<Value> {
        self.request_json(method, path, RequestPayload::Json(body))
            .await
    }

    async fn send_multipart(
        &self,
        method: HttpMethod,
        path: String,
        form: UploadForm,
    ) -> Result<Value> {
        self.request_json(method, path, RequestPayload::Multipart(form))
            .await
    }

    async fn request_json(
        &self,
        method: HttpMethod,
        path: String,
        payload: RequestPayload,
    ) -> Result<Value> {
        let response = self.dispatcher.send(method, &path, payload).await?;
        response
            .into_json()
            .ok_or(Error::UnexpectedBody("expected a JSON response"))
    }
}
