//! Signed request execution against shop-scoped endpoints.
//!
//! [`ShopClient`] wraps every outbound call in the credential lifecycle:
//! it signs the request with the current access token, detects the
//! upstream's expired/invalid-token errors, and on such an error performs
//! exactly one refresh-and-retry cycle before giving up.
//!
//! The per-call state machine has two states. The first attempt signs with
//! the stored token; if the response carries an access-token-invalid error,
//! the client refreshes through the shared [`TokenClient`], re-signs with
//! the new token and a fresh timestamp, and executes once more. Whatever the
//! second attempt returns — success or any error — is terminal.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::auth::error::AuthError;
use crate::auth::signature::{current_timestamp, sign_with_token};
use crate::auth::token::TokenClient;
use crate::clients::errors::HttpError;
use crate::clients::response::{extract_error, unwrap_envelope};
use crate::clients::HttpClient;
use crate::credentials::CredentialStore;

/// HTTP methods supported by the signed executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request; any body is ignored.
    Get,
    /// POST request with a JSON body.
    Post,
}

/// Errors produced by the signed request executor.
///
/// # Thread Safety
///
/// `ShopError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum ShopError {
    /// No access token is configured.
    ///
    /// Raised before any network call — distinct from an API-reported auth
    /// error, which indicates a token that exists but was rejected.
    #[error("No access token configured. Complete the authorization flow to obtain a token pair.")]
    MissingAccessToken,

    /// The upstream API reported a structured error.
    #[error("Shopee API error '{code}': {message}")]
    Api {
        /// The upstream error code.
        code: String,
        /// The upstream error message.
        message: String,
    },

    /// The refresh performed for the retry failed.
    ///
    /// Carries the refresh failure itself, which is more actionable than
    /// the original token-invalid error — in particular it distinguishes a
    /// stale refresh token, which requires re-authorization.
    #[error("Token refresh during retry failed: {0}")]
    Refresh(#[source] AuthError),

    /// Wrapped transport error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ShopError {
    /// Returns `true` if recovery requires the user to re-authorize.
    #[must_use]
    pub const fn requires_reauthorization(&self) -> bool {
        matches!(self, Self::Refresh(inner) if inner.requires_reauthorization())
    }
}

// Verify ShopError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopError>();
};

/// Executor for signed, authenticated shop-scoped calls.
///
/// Business modules (order listing, product sync, ...) are callers of this
/// type: they supply the endpoint path and their own query parameters, and
/// the executor supplies the auth fields (`partner_id`, `timestamp`,
/// `access_token`, `shop_id`, `sign`) plus the expiry-recovery policy.
///
/// # Example
///
/// ```rust,ignore
/// use shopee_partner_api::clients::ShopClient;
///
/// let orders = shop_client
///     .get("/api/v2/order/get_order_list", &[
///         ("time_range_field", "create_time"),
///         ("page_size", "20"),
///     ])
///     .await?;
/// ```
#[derive(Debug)]
pub struct ShopClient {
    store: Arc<CredentialStore>,
    token: Arc<TokenClient>,
    http: HttpClient,
}

// Verify ShopClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopClient>();
};

impl ShopClient {
    /// Creates an executor sharing the token client's credential store.
    #[must_use]
    pub fn new(token: Arc<TokenClient>) -> Self {
        let store = Arc::clone(token.store());
        let http = HttpClient::new(store.api_host());
        Self { store, token, http }
    }

    /// Returns the credential store this executor reads tokens from.
    #[must_use]
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Executes a signed GET request.
    ///
    /// `params` are the endpoint's own query parameters; the auth fields
    /// are added by the executor.
    ///
    /// # Errors
    ///
    /// See [`ShopClient::execute`].
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ShopError> {
        self.execute(HttpMethod::Get, path, params, None).await
    }

    /// Executes a signed POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ShopClient::execute`].
    pub async fn post(
        &self,
        path: &str,
        params: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, ShopError> {
        self.execute(HttpMethod::Post, path, params, Some(body))
            .await
    }

    /// Executes a signed request with the single-retry expiry policy.
    ///
    /// On success the `response` envelope is unwrapped if present and the
    /// payload returned.
    ///
    /// # Errors
    ///
    /// - [`ShopError::MissingAccessToken`] when no access token is stored
    ///   (no network call is made)
    /// - [`ShopError::Api`] for upstream errors, including any error on the
    ///   retried attempt
    /// - [`ShopError::Refresh`] when the mid-call refresh fails
    /// - [`ShopError::Http`] on transport failure of either attempt
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ShopError> {
        let access_token = self
            .store
            .access_token()
            .ok_or(ShopError::MissingAccessToken)?;

        let content = self.attempt(method, path, params, body, &access_token).await?;

        let (code, message) = match extract_error(&content) {
            None => return Ok(unwrap_envelope(content)),
            Some(err) => err,
        };

        if !is_access_token_invalid(&code) {
            tracing::error!(%code, %message, path, "shop request rejected by upstream");
            return Err(ShopError::Api { code, message });
        }

        // Single refresh-and-retry cycle; the retry's outcome is terminal.
        tracing::info!(%code, path, "access token rejected; refreshing and retrying once");
        let refreshed = self
            .token
            .refresh_access_token(None)
            .await
            .map_err(ShopError::Refresh)?;

        let retry = self
            .attempt(method, path, params, body, &refreshed.access_token)
            .await?;

        match extract_error(&retry) {
            None => Ok(unwrap_envelope(retry)),
            Some((code, message)) => {
                tracing::error!(%code, %message, path, "retried shop request rejected by upstream");
                Err(ShopError::Api { code, message })
            }
        }
    }

    /// Executes one network attempt with a fresh timestamp and signature.
    async fn attempt(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
        access_token: &str,
    ) -> Result<Value, HttpError> {
        let ts = current_timestamp();
        let sign = sign_with_token(
            self.store.partner_id(),
            path,
            ts,
            access_token,
            self.store.shop_id(),
            self.store.partner_key().as_ref(),
        );

        let mut query: Vec<(String, String)> = vec![
            ("partner_id".to_string(), self.store.partner_id().to_string()),
            ("timestamp".to_string(), ts.to_string()),
            ("access_token".to_string(), access_token.to_string()),
            ("shop_id".to_string(), self.store.shop_id().to_string()),
            ("sign".to_string(), sign),
        ];
        query.extend(
            params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        );

        match method {
            HttpMethod::Get => self.http.get(path, &query).await,
            HttpMethod::Post => {
                let empty = Value::Object(serde_json::Map::new());
                self.http
                    .post(path, body.unwrap_or(&empty), &query)
                    .await
            }
        }
    }
}

/// Returns `true` if the upstream error code signals an expired or invalid
/// access token, the condition recoverable by a refresh.
///
/// `invalid_acceess_token` is the literal value the upstream API sends;
/// the misspelling is part of the wire contract and must not be corrected.
fn is_access_token_invalid(code: &str) -> bool {
    matches!(
        code,
        "error_auth" | "error_access_token" | "invalid_acceess_token"
    )
}
