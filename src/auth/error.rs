//! Error types for token acquisition and refresh.

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur while acquiring or refreshing tokens.
///
/// Configuration errors fail fast without a network call, transport errors
/// pass through unchanged, and upstream API errors are classified so that a
/// stale refresh token is distinguishable from everything else.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No refresh token is configured.
    ///
    /// Raised before any network call when a refresh is requested but
    /// neither an override nor a stored refresh token exists.
    #[error("No refresh token configured. Complete the authorization flow first to obtain a token pair.")]
    MissingRefreshToken,

    /// The refresh token itself has gone stale.
    ///
    /// The upstream contract expires a refresh token that is unused for 30
    /// days. Recovery requires the user to re-authorize via the
    /// authorization URL and exchange a fresh code; no amount of retrying
    /// the refresh endpoint will help.
    #[error("Refresh token is no longer valid ({code}: {message}). Re-authorize via the authorization URL to obtain a new token pair.")]
    RefreshTokenStale {
        /// The upstream error code.
        code: String,
        /// The upstream error message.
        message: String,
    },

    /// The upstream API reported a structured error.
    #[error("Shopee API error '{code}': {message}")]
    Api {
        /// The upstream error code.
        code: String,
        /// The upstream error message.
        message: String,
    },

    /// The response reported success but is missing expected token fields.
    #[error("Malformed token response: {reason}")]
    MalformedTokenResponse {
        /// Description of what is missing or malformed.
        reason: String,
    },

    /// Wrapped transport error.
    ///
    /// Connection failures and timeouts are not evidence that a token is
    /// invalid, so they are surfaced as-is rather than folded into an API
    /// error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl AuthError {
    /// Returns `true` if recovery requires the user to re-authorize.
    ///
    /// This is the user-actionable signal for a stale refresh token: the
    /// caller should surface the authorization URL instead of retrying.
    #[must_use]
    pub const fn requires_reauthorization(&self) -> bool {
        matches!(self, Self::RefreshTokenStale { .. })
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_refresh_token_message() {
        let error = AuthError::MissingRefreshToken;
        assert!(error.to_string().contains("No refresh token configured"));
    }

    #[test]
    fn test_refresh_token_stale_includes_code_and_action() {
        let error = AuthError::RefreshTokenStale {
            code: "invalid_refresh_token".to_string(),
            message: "refresh token expired".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("invalid_refresh_token"));
        assert!(message.contains("Re-authorize"));
    }

    #[test]
    fn test_requires_reauthorization_only_for_stale_refresh() {
        let stale = AuthError::RefreshTokenStale {
            code: "error_auth".to_string(),
            message: String::new(),
        };
        assert!(stale.requires_reauthorization());

        let generic = AuthError::Api {
            code: "error_param".to_string(),
            message: "bad request".to_string(),
        };
        assert!(!generic.requires_reauthorization());
        assert!(!AuthError::MissingRefreshToken.requires_reauthorization());
    }

    #[test]
    fn test_api_error_includes_code_and_message() {
        let error = AuthError::Api {
            code: "error_param".to_string(),
            message: "invalid timestamp".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("error_param"));
        assert!(message.contains("invalid timestamp"));
    }

    #[test]
    fn test_auth_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthError>();
    }
}
