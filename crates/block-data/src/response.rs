//! Response handling for the block-renderer endpoint.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::FetchError;

/// A raw HTTP response produced by a transport.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Success payload of the block-renderer endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderedBlock {
    /// The server-rendered HTML string (may be exactly empty).
    pub rendered: String,
}

/// Error payload shape reported by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RestErrorPayload {
    pub code: Option<String>,
    pub message: String,
}
