//! HTTP client for Shopee open platform communication.
//!
//! This module provides the [`HttpClient`] type, a thin transport wrapper
//! around `reqwest` that resolves every request to the parsed JSON body.
//!
//! The upstream API reports business failures *inside* a 200 response (an
//! `error`/`message` envelope), so the client parses the body verbatim
//! regardless of HTTP status and leaves error classification to its callers.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::config::ApiHost;

/// Bounded timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of body bytes preserved when a non-JSON response is reported.
const SNIPPET_LEN: usize = 200;

/// Transport client for the Shopee open platform.
///
/// Query parameters (including the auth fields and signature) are supplied
/// by callers; the client itself is credential-agnostic.
///
/// # Thread Safety
///
/// `HttpClient` is `Clone`, `Send`, and `Sync`; clones share the underlying
/// connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given API host.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(host: &ApiHost) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: host.base_url(),
        }
    }

    /// Returns the base URL this client sends requests to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a POST request with a JSON body and returns the parsed
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on connection failure, timeout, or a non-JSON
    /// response body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        query: &[(String, String)],
    ) -> Result<Value, HttpError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(e, path))?;

        Self::parse_body(response, path).await
    }

    /// Sends a GET request and returns the parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on connection failure, timeout, or a non-JSON
    /// response body.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, HttpError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(e, path))?;

        Self::parse_body(response, path).await
    }

    /// Reads the response body and parses it as JSON, preserving the
    /// upstream bytes verbatim.
    async fn parse_body(response: reqwest::Response, path: &str) -> Result<Value, HttpError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::from_reqwest(e, path))?;

        serde_json::from_str(&text).map_err(|_| HttpError::InvalidJson {
            status,
            snippet: text.chars().take(SNIPPET_LEN).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_bare_host() {
        let host = ApiHost::new("partner.shopeemobile.com").unwrap();
        let client = HttpClient::new(&host);
        assert_eq!(client.base_url(), "https://partner.shopeemobile.com");
    }

    #[test]
    fn test_base_url_from_full_url() {
        let host = ApiHost::new("http://127.0.0.1:9999").unwrap();
        let client = HttpClient::new(&host);
        assert_eq!(client.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_network_error() {
        // Nothing listens on this port; the request must surface a transport
        // error, never an API-style error value.
        let host = ApiHost::new("http://127.0.0.1:1").unwrap();
        let client = HttpClient::new(&host);

        let result = client.get("/api/v2/order/get_order_list", &[]).await;
        assert!(matches!(
            result,
            Err(HttpError::Network(_) | HttpError::Timeout { .. })
        ));
    }
}
