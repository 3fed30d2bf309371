//! Error types for the HTTP client layer
//!
//! Every failure a single API call can hit is one variant of [`ClientError`],
//! so callers can tell a request that never left the process apart from a
//! remote that answered with the wrong status or an unreadable payload.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors produced while building, sending or reading an API call
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A request option failed to apply; nothing was sent.
    #[error("failed to build request: {message}")]
    Build {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("request failed: {method} {url}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered, but the response filter rejected the status.
    /// The response body is dropped on this path.
    #[error("non-2xx status code from remote: {status} ({url})")]
    Status { status: StatusCode, url: String },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode json response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// An interceptor broke the chain contract (for example it never
    /// produced a response).
    #[error("interceptor contract violated: {0}")]
    Contract(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Create a build error with an underlying cause
    pub fn build(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Build {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Status code carried by a filtered response, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether sending the same request again could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
