//! Fetch error types.

use thiserror::Error;

/// Errors that can occur when fetching a rendered block.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid base URL or path.
    #[error("Invalid URL: {0}")]
    Url(String),

    /// Could not reach the server.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server answered with an error.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Failed to parse the response payload.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_message_only() {
        let err = FetchError::Http {
            status: 400,
            message: "Invalid block".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid block");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: FetchError = parse_err.into();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
