use thiserror::Error;

use crate::Method;

/// Errors raised while exchanging a request with the API.
///
/// Everything here is a transport-level failure from the user's point of
/// view: the server never produced a usable JSON answer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and no failure marker.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The configured base URL could not be combined with the request path.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// No scripted response matched (in-memory transport only).
    #[error("No response scripted for {method} {path}")]
    Unrouted { method: Method, path: String },

    /// A scripted network failure (in-memory transport only).
    #[error("Network failure: {0}")]
    Network(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
