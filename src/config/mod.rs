//! Configuration types for the Shopee partner API SDK.
//!
//! This module provides the core configuration types used to initialize
//! the SDK for API communication with the Shopee open platform.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`PartnerConfig`]: The main configuration struct holding partner and shop identity
//! - [`PartnerConfigBuilder`]: A builder for constructing [`PartnerConfig`] instances
//! - [`PartnerKey`]: A validated signing key newtype with masked debug output
//! - [`ApiHost`]: A validated API host
//!
//! # Example
//!
//! ```rust
//! use shopee_partner_api::{PartnerConfig, PartnerKey};
//!
//! let config = PartnerConfig::builder()
//!     .partner_id(2_013_772)
//!     .shop_id(1_306_398_160)
//!     .partner_key(PartnerKey::new("my-partner-key").unwrap())
//!     .redirect_url("https://myapp.example.com/callback")
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiHost, PartnerKey};

use crate::error::ConfigError;

/// Configuration for the Shopee partner API SDK.
///
/// This struct holds the partner-level identity (partner id and signing key),
/// the shop the SDK operates on, the API host, and the initial token pair
/// loaded from persisted configuration.
///
/// The identity fields are immutable for the process lifetime. The token
/// fields are only the *initial* values; once a
/// [`CredentialStore`](crate::credentials::CredentialStore) is constructed
/// from this config, the store is the single writer of the current pair.
///
/// # Thread Safety
///
/// `PartnerConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct PartnerConfig {
    partner_id: u64,
    shop_id: u64,
    partner_key: PartnerKey,
    api_host: ApiHost,
    redirect_url: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl PartnerConfig {
    /// Creates a new builder for constructing a `PartnerConfig`.
    #[must_use]
    pub fn builder() -> PartnerConfigBuilder {
        PartnerConfigBuilder::new()
    }

    /// Returns the partner id.
    #[must_use]
    pub const fn partner_id(&self) -> u64 {
        self.partner_id
    }

    /// Returns the shop id.
    #[must_use]
    pub const fn shop_id(&self) -> u64 {
        self.shop_id
    }

    /// Returns the partner signing key.
    #[must_use]
    pub const fn partner_key(&self) -> &PartnerKey {
        &self.partner_key
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &ApiHost {
        &self.api_host
    }

    /// Returns the redirect URL used in the authorization flow, if configured.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Returns the initially loaded access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the initially loaded refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

// Verify PartnerConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PartnerConfig>();
};

/// Builder for constructing [`PartnerConfig`] instances.
///
/// Required fields are `partner_id`, `shop_id`, and `partner_key`. The API
/// host defaults to the production Shopee host; tokens and the redirect URL
/// default to unset.
///
/// # Example
///
/// ```rust
/// use shopee_partner_api::{ApiHost, PartnerConfig, PartnerKey};
///
/// let config = PartnerConfig::builder()
///     .partner_id(2_013_772)
///     .shop_id(1_306_398_160)
///     .partner_key(PartnerKey::new("key").unwrap())
///     .api_host(ApiHost::new("partner.test-stable.shopeemobile.com").unwrap())
///     .access_token("stored-access-token")
///     .refresh_token("stored-refresh-token")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct PartnerConfigBuilder {
    partner_id: Option<u64>,
    shop_id: Option<u64>,
    partner_key: Option<PartnerKey>,
    api_host: Option<ApiHost>,
    redirect_url: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl PartnerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partner id (required).
    #[must_use]
    pub const fn partner_id(mut self, id: u64) -> Self {
        self.partner_id = Some(id);
        self
    }

    /// Sets the shop id (required).
    #[must_use]
    pub const fn shop_id(mut self, id: u64) -> Self {
        self.shop_id = Some(id);
        self
    }

    /// Sets the partner signing key (required).
    #[must_use]
    pub fn partner_key(mut self, key: PartnerKey) -> Self {
        self.partner_key = Some(key);
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn api_host(mut self, host: ApiHost) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the redirect URL for the authorization flow.
    #[must_use]
    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Sets the initial access token loaded from persisted configuration.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the initial refresh token loaded from persisted configuration.
    #[must_use]
    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Builds the [`PartnerConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `partner_id`,
    /// `shop_id`, or `partner_key` are not set.
    pub fn build(self) -> Result<PartnerConfig, ConfigError> {
        let partner_id = self.partner_id.ok_or(ConfigError::MissingRequiredField {
            field: "partner_id",
        })?;
        let shop_id = self
            .shop_id
            .ok_or(ConfigError::MissingRequiredField { field: "shop_id" })?;
        let partner_key = self.partner_key.ok_or(ConfigError::MissingRequiredField {
            field: "partner_key",
        })?;

        Ok(PartnerConfig {
            partner_id,
            shop_id,
            partner_key,
            api_host: self.api_host.unwrap_or_else(ApiHost::production),
            redirect_url: self.redirect_url,
            access_token: self.access_token.filter(|t| !t.is_empty()),
            refresh_token: self.refresh_token.filter(|t| !t.is_empty()),
        })
    }
}
