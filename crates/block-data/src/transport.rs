//! Transport seam between the render client and the HTTP stack.

use async_trait::async_trait;
use url::Url;

use crate::{FetchError, Method, Response};

/// An outbound request, fully assembled and ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL, query string included.
    pub url: Url,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, POST only.
    pub body: Option<Vec<u8>>,
}

/// Sends prepared requests and returns raw responses.
///
/// The render client only talks to this seam; tests substitute a mock
/// implementation here.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response.
    async fn send(&self, request: PreparedRequest) -> Result<Response, FetchError>;
}

/// Transport over a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport over an existing `reqwest` client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PreparedRequest) -> Result<Response, FetchError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
        };

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(Response::new(status, body))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_connect() || e.is_timeout() {
        FetchError::Connection(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}
