//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to a ContextDB server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, or a body that could not be read or decoded
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body is not valid JSON
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server answered with a non-2xx status
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Expected key absent from a response
    #[error("unexpected response format: missing '{0}'")]
    MissingField(String),

    /// Request rejected before it was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// API key cannot be used as a header value
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl ClientError {
    /// Returns true for errors raised by the transport or a non-2xx status.
    pub fn is_http(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Status { .. })
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// HTTP status code, if the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `error` field of the server's `{error, code, details}` error body.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ClientError::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string)),
            _ => None,
        }
    }
}
