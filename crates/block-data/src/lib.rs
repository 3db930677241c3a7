//! REST client for the block-renderer endpoint.
//!
//! The server owns the rendering of a named block; this crate builds the
//! request that asks for it and converts the reply into a rendered HTML
//! string or a display-ready error.
//!
//! # Example
//!
//! ```rust,ignore
//! use block_data::{RenderClient, RenderRequest};
//!
//! let client = RenderClient::new("https://example.com/wp-json")?;
//! let request = RenderRequest::get("core/latest-posts").with_attribute("postsToShow", 5);
//! let html = client.fetch(&request).await?;
//! ```

mod error;
mod request;
mod response;
mod transport;

pub use error::*;
pub use request::*;
pub use response::{RenderedBlock, Response};
pub use transport::*;

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use response::RestErrorPayload;

/// Client for fetching server-rendered blocks.
#[derive(Clone)]
pub struct RenderClient {
    base_url: Url,
    default_headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl RenderClient {
    /// Create a client for the given REST API base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url.as_ref()).map_err(|e| FetchError::Url(e.to_string()))?;
        Ok(Self {
            base_url,
            default_headers: Vec::new(),
            transport: Arc::new(HttpTransport::new()),
        })
    }

    /// Add a default header included in every request.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Swap the transport. Tests substitute a mock here.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Get the REST API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the rendered HTML for a request.
    ///
    /// Every transport or server failure is converted into a [`FetchError`];
    /// nothing propagates as a panic. The rendered string may be exactly
    /// empty, and the caller decides what that means.
    pub async fn fetch(&self, request: &RenderRequest) -> Result<String, FetchError> {
        let url = request.build_path(&self.base_url);
        let body = match request.body_value() {
            Some(value) => Some(serde_json::to_vec(&value)?),
            None => None,
        };

        debug!(method = request.method.as_str(), url = %url, "sending render request");

        let prepared = PreparedRequest {
            method: request.method,
            url,
            headers: self.default_headers.clone(),
            body,
        };
        let response = self.transport.send(prepared).await?;

        if !response.is_success() {
            return Err(rest_error(&response));
        }

        let block: RenderedBlock = response.json()?;
        Ok(block.rendered)
    }
}

/// Convert a non-2xx response into a display-ready error.
fn rest_error(response: &Response) -> FetchError {
    match response.json::<RestErrorPayload>() {
        Ok(payload) => {
            warn!(
                status = response.status,
                code = payload.code.as_deref().unwrap_or(""),
                "server rejected render request"
            );
            FetchError::Http {
                status: response.status,
                message: payload.message,
            }
        }
        Err(_) => FetchError::Http {
            status: response.status,
            message: format!("HTTP {}", response.status),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Records prepared requests and replays queued responses.
    struct MockTransport {
        requests: Mutex<Vec<PreparedRequest>>,
        responses: Mutex<VecDeque<Result<Response, FetchError>>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Result<Response, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into_iter().collect()),
            })
        }

        fn sent(&self) -> Vec<PreparedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: PreparedRequest) -> Result<Response, FetchError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Response::new(200, br#"{"rendered":""}"#.to_vec())))
        }
    }

    fn client_with(transport: Arc<MockTransport>) -> RenderClient {
        RenderClient::new("https://example.com/wp-json")
            .unwrap()
            .with_transport(transport)
    }

    // === Fetch Tests ===

    #[tokio::test]
    async fn test_fetch_returns_rendered_html() {
        let transport = MockTransport::new(vec![Ok(Response::new(
            200,
            br#"{"rendered":"<ul>posts</ul>"}"#.to_vec(),
        ))]);
        let client = client_with(transport.clone());

        let html = client
            .fetch(&RenderRequest::get("core/latest-posts"))
            .await
            .unwrap();

        assert_eq!(html, "<ul>posts</ul>");
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url.as_str(),
            "https://example.com/wp-json/wp/v2/block-renderer/core/latest-posts?context=edit"
        );
        assert!(sent[0].body.is_none());
    }

    #[tokio::test]
    async fn test_fetch_empty_rendered_string_is_ok() {
        let transport =
            MockTransport::new(vec![Ok(Response::new(200, br#"{"rendered":""}"#.to_vec()))]);
        let client = client_with(transport);

        let html = client
            .fetch(&RenderRequest::get("core/archives"))
            .await
            .unwrap();
        assert_eq!(html, "");
    }

    #[tokio::test]
    async fn test_fetch_post_sends_json_body() {
        let transport = MockTransport::new(vec![Ok(Response::new(
            200,
            br#"{"rendered":"<ul></ul>"}"#.to_vec(),
        ))]);
        let client = client_with(transport.clone());

        let request = RenderRequest::post("core/latest-posts").with_attribute("postsToShow", 5);
        client.fetch(&request).await.unwrap();

        let sent = transport.sent();
        assert_eq!(
            sent[0].body.as_deref(),
            Some(br#"{"attributes":{"postsToShow":5}}"# as &[u8])
        );
        assert!(sent[0].url.query_pairs().all(|(k, _)| k == "context"));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_server_error_message() {
        let transport = MockTransport::new(vec![Ok(Response::new(
            400,
            br#"{"code":"block_invalid","message":"Invalid block"}"#.to_vec(),
        ))]);
        let client = client_with(transport);

        let err = client
            .fetch(&RenderRequest::get("no/such-block"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid block");
    }

    #[tokio::test]
    async fn test_fetch_unparseable_error_body_uses_status() {
        let transport = MockTransport::new(vec![Ok(Response::new(
            502,
            b"<html>bad gateway</html>".to_vec(),
        ))]);
        let client = client_with(transport);

        let err = client
            .fetch(&RenderRequest::get("core/latest-posts"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn test_fetch_forwards_default_headers() {
        let transport = MockTransport::new(vec![Ok(Response::new(
            200,
            br#"{"rendered":"<p>x</p>"}"#.to_vec(),
        ))]);
        let client = client_with(transport.clone())
            .with_default_header("X-WP-Nonce", "abc123");

        client
            .fetch(&RenderRequest::get("core/latest-posts"))
            .await
            .unwrap();

        let sent = transport.sent();
        assert!(sent[0]
            .headers
            .iter()
            .any(|(k, v)| k == "X-WP-Nonce" && v == "abc123"));
    }

    #[tokio::test]
    async fn test_fetch_propagates_transport_failure() {
        let transport = MockTransport::new(vec![Err(FetchError::Connection(
            "connection refused".to_string(),
        ))]);
        let client = client_with(transport);

        let err = client
            .fetch(&RenderRequest::get("core/latest-posts"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Connection(_)));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(matches!(
            RenderClient::new("not a url"),
            Err(FetchError::Url(_))
        ));
    }
}
