//! Token acquisition and refresh against the Shopee auth endpoints.
//!
//! This module implements the two token-acquisition flows of the partner
//! API plus authorization URL generation:
//!
//! - [`TokenClient::authorization_url`]: builds the user-consent URL with a
//!   partner-level signature (no network call);
//! - [`TokenClient::exchange_code`]: exchanges a one-time authorization code
//!   for the initial token pair (`/api/v2/auth/token/get`);
//! - [`TokenClient::refresh_access_token`]: mints a new token pair from the
//!   refresh token (`/api/v2/auth/access_token/get`).
//!
//! Both network flows write successful results back to the
//! [`CredentialStore`] so that subsequent signed requests pick the fresh
//! pair up immediately. Neither retries internally; retry policy lives in
//! the signed request executor, and the renewal loop simply tries again on
//! its next tick.
//!
//! # Refresh token staleness
//!
//! The upstream contract expires a refresh token that is unused for 30
//! days. When the refresh endpoint reports the auth/invalid-token error
//! family, the failure is classified as [`AuthError::RefreshTokenStale`] —
//! a distinct, user-actionable condition whose only remedy is re-running
//! the authorization flow.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::error::AuthError;
use crate::auth::signature::{current_timestamp, sign};
use crate::clients::response::{extract_error, int_field, string_field};
use crate::clients::HttpClient;
use crate::credentials::CredentialStore;

/// Path of the shop authorization (user consent) page.
pub const AUTH_PARTNER_PATH: &str = "/api/v2/shop/auth_partner";

/// Path of the code-exchange endpoint.
pub const TOKEN_GET_PATH: &str = "/api/v2/auth/token/get";

/// Path of the refresh endpoint.
pub const ACCESS_TOKEN_GET_PATH: &str = "/api/v2/auth/access_token/get";

/// Request body for the code exchange.
#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    code: &'a str,
    shop_id: u64,
    partner_id: u64,
}

/// Request body for the token refresh.
#[derive(Debug, Serialize)]
struct RefreshTokenRequest<'a> {
    refresh_token: &'a str,
    shop_id: u64,
    partner_id: u64,
}

/// A successfully obtained token pair.
///
/// Transient: the token fields are persisted into the credential store by
/// the client itself; this struct is only returned to the caller for
/// inspection and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResult {
    /// The new access token.
    pub access_token: String,
    /// The new refresh token.
    pub refresh_token: String,
    /// Access token lifetime in seconds, when the upstream reports it.
    pub expire_in: Option<i64>,
}

/// Client for the partner-level auth endpoints.
///
/// Stateless apart from reading and writing the shared [`CredentialStore`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopee_partner_api::auth::TokenClient;
///
/// let token_client = TokenClient::new(Arc::clone(&store));
/// let result = token_client.refresh_access_token(None).await?;
/// println!("new access token: {}", result.access_token);
/// ```
#[derive(Debug)]
pub struct TokenClient {
    store: Arc<CredentialStore>,
    http: HttpClient,
}

// Verify TokenClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenClient>();
};

impl TokenClient {
    /// Creates a client talking to the store's configured API host.
    #[must_use]
    pub fn new(store: Arc<CredentialStore>) -> Self {
        let http = HttpClient::new(store.api_host());
        Self { store, http }
    }

    /// Returns the credential store this client writes through.
    #[must_use]
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Builds the partner authorization URL for the user-consent flow.
    ///
    /// No network call is made. The user completes the consent flow in a
    /// browser and the one-time code arrives at the configured redirect URL,
    /// to be passed to [`TokenClient::exchange_code`].
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let ts = current_timestamp();
        let sign = sign(
            self.store.partner_id(),
            AUTH_PARTNER_PATH,
            ts,
            self.store.partner_key().as_ref(),
        );
        let redirect = urlencoding::encode(self.store.redirect_url().unwrap_or_default());

        format!(
            "{base}{AUTH_PARTNER_PATH}?partner_id={partner_id}&redirect={redirect}&timestamp={ts}&sign={sign}",
            base = self.store.api_host().base_url(),
            partner_id = self.store.partner_id(),
        )
    }

    /// Exchanges a one-time authorization code for the initial token pair.
    ///
    /// On success the pair is written to the credential store. On an
    /// upstream error the store is left untouched.
    ///
    /// The code is single-use by the partner API's contract: a failed
    /// exchange cannot be retried with the same code.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Api`] when the upstream reports an error
    /// - [`AuthError::MalformedTokenResponse`] when the response lacks tokens
    /// - [`AuthError::Http`] on transport failure
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResult, AuthError> {
        let body = TokenExchangeRequest {
            code,
            shop_id: self.store.shop_id(),
            partner_id: self.store.partner_id(),
        };
        let query = self.partner_query(TOKEN_GET_PATH);

        let content = self.http.post(TOKEN_GET_PATH, &body, &query).await?;

        if let Some((code, message)) = extract_error(&content) {
            tracing::error!(%code, %message, "code exchange rejected by upstream");
            return Err(AuthError::Api { code, message });
        }

        let result = Self::parse_tokens(&content)?;
        self.store
            .update_tokens(&result.access_token, &result.refresh_token);
        tracing::info!("authorization code exchanged; token pair stored");
        Ok(result)
    }

    /// Mints a new token pair from a refresh token.
    ///
    /// Uses `refresh_token` when given, otherwise the one in the credential
    /// store. On success the new pair is written to the store and returned.
    ///
    /// Does not retry internally.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingRefreshToken`] when no token is available
    ///   (returned before any network call)
    /// - [`AuthError::RefreshTokenStale`] when the upstream signals the
    ///   refresh token itself has expired; re-authorization is required
    /// - [`AuthError::Api`] for any other upstream error
    /// - [`AuthError::MalformedTokenResponse`] when the response lacks tokens
    /// - [`AuthError::Http`] on transport failure
    pub async fn refresh_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<TokenResult, AuthError> {
        let token = match refresh_token {
            Some(t) => t.to_string(),
            None => self
                .store
                .refresh_token()
                .ok_or(AuthError::MissingRefreshToken)?,
        };

        let body = RefreshTokenRequest {
            refresh_token: &token,
            shop_id: self.store.shop_id(),
            partner_id: self.store.partner_id(),
        };
        let query = self.partner_query(ACCESS_TOKEN_GET_PATH);

        let content = self.http.post(ACCESS_TOKEN_GET_PATH, &body, &query).await?;

        if let Some((code, message)) = extract_error(&content) {
            if is_refresh_token_stale(&code, &message) {
                tracing::error!(
                    %code, %message,
                    "refresh token has gone stale (30-day unused window); re-authorization required"
                );
                return Err(AuthError::RefreshTokenStale { code, message });
            }
            tracing::error!(%code, %message, "token refresh rejected by upstream");
            return Err(AuthError::Api { code, message });
        }

        let result = Self::parse_tokens(&content)?;
        self.store
            .update_tokens(&result.access_token, &result.refresh_token);
        tracing::info!(expire_in = ?result.expire_in, "access token refreshed; token pair stored");
        Ok(result)
    }

    /// Builds the partner-level auth query fields for `path`.
    fn partner_query(&self, path: &str) -> Vec<(String, String)> {
        let ts = current_timestamp();
        let sign = sign(
            self.store.partner_id(),
            path,
            ts,
            self.store.partner_key().as_ref(),
        );
        vec![
            ("partner_id".to_string(), self.store.partner_id().to_string()),
            ("timestamp".to_string(), ts.to_string()),
            ("sign".to_string(), sign),
        ]
    }

    /// Reads the token fields out of a success response.
    fn parse_tokens(content: &serde_json::Value) -> Result<TokenResult, AuthError> {
        let access_token = string_field(content, "access_token").ok_or_else(|| {
            AuthError::MalformedTokenResponse {
                reason: "missing access_token".to_string(),
            }
        })?;
        let refresh_token = string_field(content, "refresh_token").ok_or_else(|| {
            AuthError::MalformedTokenResponse {
                reason: "missing refresh_token".to_string(),
            }
        })?;

        Ok(TokenResult {
            access_token,
            refresh_token,
            expire_in: int_field(content, "expire_in"),
        })
    }
}

/// Returns `true` if the upstream refresh error signals a stale refresh
/// token (as opposed to a transient or caller error).
///
/// The matched codes are the literal values the upstream API sends; the
/// message check mirrors its free-text variants.
fn is_refresh_token_stale(code: &str, message: &str) -> bool {
    code == "error_auth" || code == "invalid_refresh_token" || message.contains("refresh")
}
