//! Transport-level error types for the HTTP client.
//!
//! These errors cover everything *below* the upstream API's structured
//! `error`/`message` envelope: connection failures, timeouts, and bodies that
//! are not valid JSON. They are deliberately distinct from API-reported
//! errors, since a transport failure is not evidence that a token is invalid.

use thiserror::Error;

/// Errors that can occur while talking to the upstream API at the
/// transport level.
///
/// # Thread Safety
///
/// `HttpError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request did not complete within the client's timeout.
    #[error("Request to '{path}' timed out")]
    Timeout {
        /// The request path that timed out.
        path: String,
    },

    /// A network-level failure (connection refused, DNS, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The upstream returned a body that is not valid JSON.
    ///
    /// The snippet is truncated so that HTML error pages do not flood logs.
    #[error("Invalid JSON response (HTTP {status}): {snippet}")]
    InvalidJson {
        /// HTTP status code of the response.
        status: u16,
        /// Leading bytes of the offending body.
        snippet: String,
    },
}

impl HttpError {
    /// Classifies a `reqwest` error, keeping timeouts distinct from other
    /// network failures.
    pub(crate) fn from_reqwest(err: reqwest::Error, path: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                path: path.to_string(),
            }
        } else {
            Self::Network(err)
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
