//! Normalized API responses

/// The decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A JSON payload.
    Json(serde_json::Value),
    /// Raw bytes, returned by the picture-download endpoint.
    Binary(Vec<u8>),
}

/// A successful (2xx) response from a resource endpoint.
///
/// Non-2xx responses never reach this type; they surface as errors carrying
/// the upstream status and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded body.
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Consumes the response and returns the JSON body, or `None` if the
    /// response was binary.
    #[must_use]
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Binary(_) => None,
        }
    }

    /// Consumes the response and returns the raw bytes, or `None` if the
    /// response was JSON.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self.body {
            ResponseBody::Binary(bytes) => Some(bytes),
            ResponseBody::Json(_) => None,
        }
    }
}
