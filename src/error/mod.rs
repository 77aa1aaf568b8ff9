use std::fmt;

use thiserror::Error;

/// The category of failure reported by a model provider.
///
/// Carried inside [`RDescribeError::ApiError`] so callers can react to, for
/// example, an authentication problem differently from a rate limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Missing, empty, or rejected API key
    AuthenticationFailed,
    /// The provider rejected the request as malformed
    BadRequest { details: String },
    /// Quota exhausted or too many requests
    RateLimited,
    /// The provider failed with a 5xx status
    ServerError { status: u16, details: String },
    /// The response could not be interpreted
    UnexpectedResponse { details: String },
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::AuthenticationFailed => write!(f, "authentication failed"),
            ApiErrorKind::BadRequest { details } => write!(f, "bad request: {}", details),
            ApiErrorKind::RateLimited => write!(f, "rate limited"),
            ApiErrorKind::ServerError { status, details } => {
                write!(f, "server error ({}): {}", status, details)
            }
            ApiErrorKind::UnexpectedResponse { details } => {
                write!(f, "unexpected response: {}", details)
            }
        }
    }
}

/// Error types for the rdescribe library.
///
/// `InvalidInput` is the only failure the field extractor itself can raise.
/// The remaining variants come from the model client and its HTTP transport.
///
/// # Examples
///
/// ```
/// use rdescribe::{RDescribeError, extract};
///
/// match extract("- **Title**: Lamp", "") {
///     Err(RDescribeError::InvalidInput(msg)) => println!("rejected: {}", msg),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum RDescribeError {
    /// The caller supplied an unusable argument (empty path, unreadable image, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error reported by the model provider
    #[error("{provider} API error: {kind}")]
    ApiError {
        provider: String,
        kind: ApiErrorKind,
    },

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[cfg(feature = "gemini")]
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error (from serde_json)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RDescribeError {
    /// Build an [`RDescribeError::ApiError`] for the named provider.
    pub fn api_error(provider: impl Into<String>, kind: ApiErrorKind) -> Self {
        RDescribeError::ApiError {
            provider: provider.into(),
            kind,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RDescribeError::InvalidInput(msg.into())
    }
}

// Foreign error variants never compare equal: reqwest::Error and
// serde_json::Error do not implement PartialEq.
impl PartialEq for RDescribeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (
                Self::ApiError {
                    provider: pa,
                    kind: ka,
                },
                Self::ApiError {
                    provider: pb,
                    kind: kb,
                },
            ) => pa == pb && ka == kb,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for rdescribe operations.
pub type Result<T> = std::result::Result<T, RDescribeError>;
