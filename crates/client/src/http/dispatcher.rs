//! Authenticated request dispatch and response normalization.
//!
//! The dispatcher executes one HTTP call per `send`: it attaches the current
//! bearer token, serializes the payload (JSON or multipart), and normalizes
//! the outcome. A single attempt is made per call; retry policy, if any, is
//! the caller's responsibility.

use reqwest::multipart::{Form, Part};
use url::Url;
use veridia_domain::{
    ApiResponse, DomainError, FormField, HttpMethod, RequestPayload, ResponseBody, UploadForm,
    validate_path,
};

use crate::auth::{Authenticator, TokenExchanger};
use crate::error::{Error, Result};

/// Executes HTTP calls against the API host.
///
/// Stateless per call; the only stateful collaborator is the
/// [`Authenticator`]'s token cache.
pub struct RequestDispatcher<E> {
    http: reqwest::Client,
    base: String,
    authenticator: Authenticator<E>,
}

impl<E: TokenExchanger + 'static> RequestDispatcher<E> {
    /// Creates a dispatcher for the given host.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &Url, authenticator: Authenticator<E>) -> Self {
        Self {
            http,
            base: base_url.as_str().trim_end_matches('/').to_string(),
            authenticator,
        }
    }

    /// Returns the authenticator backing this dispatcher.
    #[must_use]
    pub const fn authenticator(&self) -> &Authenticator<E> {
        &self.authenticator
    }

    /// Executes one request and returns the normalized response.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when the path has no leading slash.
    /// - [`Error::Authentication`] when no valid token can be obtained.
    /// - [`Error::Api`] for a non-2xx upstream response, body verbatim.
    /// - [`Error::Transport`] when no response reached the client.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        payload: RequestPayload,
    ) -> Result<ApiResponse> {
        validate_path(path)?;
        let token = self.authenticator.token().await?;

        let url = format!("{}{path}", self.base);
        tracing::debug!(method = %method, path, "dispatching request");

        let mut builder = self
            .http
            .request(to_reqwest_method(method), url.as_str())
            .header("Authorization", token.authorization_header());

        builder = match payload {
            RequestPayload::None => builder,
            RequestPayload::Json(value) => builder.json(&value),
            RequestPayload::Multipart(form) => builder.multipart(to_multipart(form)?),
        };

        let response = builder.send().await.map_err(Error::Transport)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.bytes().await.map_err(Error::Transport)?.to_vec();

        normalize_response(status, &content_type, bytes)
    }
}

/// Converts the domain method to the reqwest method.
fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Converts the inspectable form model into a reqwest multipart form.
///
/// reqwest owns the boundary and the `Content-Type` header for multipart
/// bodies.
fn to_multipart(form: UploadForm) -> Result<Form> {
    let mut out = Form::new();
    for field in form.into_fields() {
        out = match field {
            FormField::Text { name, value } => out.text(name, value),
            FormField::File {
                name,
                file_name,
                content,
                mime_type,
            } => {
                let part = Part::bytes(content)
                    .file_name(file_name)
                    .mime_str(&mime_type)
                    .map_err(|_| Error::Validation(DomainError::InvalidMimeType(mime_type)))?;
                out.part(name, part)
            }
        };
    }
    Ok(out)
}

/// Normalizes one upstream outcome into the SDK result shape.
///
/// 2xx bodies are JSON-decoded when the content type says JSON (empty bodies
/// become `null`); anything else, such as the picture download, stays raw.
/// Non-2xx responses carry the upstream payload verbatim.
fn normalize_response(status: u16, content_type: &str, bytes: Vec<u8>) -> Result<ApiResponse> {
    if !(200..300).contains(&status) {
        tracing::warn!(status, "request rejected by the API");
        return Err(Error::Api {
            status,
            body: bytes,
        });
    }

    let body = if bytes.is_empty() {
        ResponseBody::Json(serde_json::Value::Null)
    } else if is_json(content_type) {
        ResponseBody::Json(serde_json::from_slice(&bytes)?)
    } else {
        ResponseBody::Binary(bytes)
    };

    Ok(ApiResponse { status, body })
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use veridia_domain::MediaFile;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(HttpMethod::Patch), reqwest::Method::PATCH);
        assert_eq!(
            to_reqwest_method(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_normalize_json_response() {
        let response = normalize_response(
            200,
            "application/json; charset=utf-8",
            br#"{"ok":true}"#.to_vec(),
        )
        .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            ResponseBody::Json(serde_json::json!({"ok": true}))
        );
    }

    #[test]
    fn test_normalize_empty_body_is_null() {
        let response = normalize_response(204, "", Vec::new()).unwrap();
        assert_eq!(response.body, ResponseBody::Json(serde_json::Value::Null));
    }

    #[test]
    fn test_normalize_binary_response() {
        let response = normalize_response(200, "image/jpeg", vec![0xff, 0xd8]).unwrap();
        assert_eq!(response.body, ResponseBody::Binary(vec![0xff, 0xd8]));
    }

    #[test]
    fn test_normalize_error_preserves_body_verbatim() {
        let upstream = br#"{"error":"unauthorized"}"#.to_vec();
        let error = normalize_response(401, "application/json", upstream.clone()).unwrap_err();
        match error {
            Error::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, upstream);
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_unparseable_json_is_a_decode_error() {
        let error = normalize_response(200, "application/json", b"{nope".to_vec()).unwrap_err();
        assert!(matches!(error, Error::Decode(_)));
    }

    #[test]
    fn test_is_json_variants() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("application/problem+json"));
        assert!(!is_json("image/jpeg"));
        assert!(!is_json(""));
    }

    #[test]
    fn test_to_multipart_accepts_text_and_file_fields() {
        let form = UploadForm::new()
            .text("side", "front")
            .file(
                "picture",
                "front.jpeg",
                MediaFile::from_bytes("front.jpeg", vec![1, 2, 3]),
            );
        assert!(to_multipart(form).is_ok());
    }

    #[test]
    fn test_to_multipart_rejects_malformed_mime() {
        let form = UploadForm::new().file(
            "picture",
            "front.jpeg",
            MediaFile::from_bytes("front.jpeg", vec![1]).with_mime_type("not a mime"),
        );
        let error = to_multipart(form).unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(DomainError::InvalidMimeType(_))
        ));
    }
}
