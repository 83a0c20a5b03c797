//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Shopee partner signing key.
///
/// This newtype ensures the key is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `PartnerKey(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use shopee_partner_api::PartnerKey;
///
/// let key = PartnerKey::new("my-partner-key").unwrap();
/// assert_eq!(format!("{:?}", key), "PartnerKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PartnerKey(String);

impl PartnerKey {
    /// Creates a new validated partner key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPartnerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyPartnerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for PartnerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PartnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PartnerKey(*****)")
    }
}

/// A validated Shopee open platform API host.
///
/// Accepts either a bare host name (the production value is
/// `partner.shopeemobile.com`) or a full base URL with scheme, which is
/// useful for pointing the SDK at the sandbox host or a local test server.
///
/// # Example
///
/// ```rust
/// use shopee_partner_api::ApiHost;
///
/// let host = ApiHost::new("partner.shopeemobile.com").unwrap();
/// assert_eq!(host.base_url(), "https://partner.shopeemobile.com");
///
/// let local = ApiHost::new("http://127.0.0.1:8080").unwrap();
/// assert_eq!(local.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost(String);

impl ApiHost {
    /// The production Shopee open platform host.
    pub const PRODUCTION: &'static str = "partner.shopeemobile.com";

    /// Creates a new validated API host.
    ///
    /// Trailing slashes are stripped so that request paths can be appended
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiHost`] if the host is empty or
    /// contains whitespace.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let trimmed = host.trim().trim_end_matches('/');

        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidApiHost { host });
        }

        // A scheme with no host ("https://", "://host") is not usable; note
        // that stripping trailing slashes reduces a bare scheme to "https:"
        if let Some(idx) = trimmed.find("://") {
            if idx == 0 || trimmed.len() <= idx + 3 {
                return Err(ConfigError::InvalidApiHost { host });
            }
        } else if trimmed.ends_with(':') {
            return Err(ConfigError::InvalidApiHost { host });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the production host.
    #[must_use]
    pub fn production() -> Self {
        Self(Self::PRODUCTION.to_string())
    }

    /// Returns the base URL for requests against this host, including scheme.
    ///
    /// Bare host names default to `https`.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.0.contains("://") {
            self.0.clone()
        } else {
            format!("https://{}", self.0)
        }
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_key_rejects_empty_string() {
        let result = PartnerKey::new("");
        assert!(matches!(result, Err(ConfigError::EmptyPartnerKey)));
    }

    #[test]
    fn test_partner_key_masks_value_in_debug() {
        let key = PartnerKey::new("super-secret-key").unwrap();
        let debug_output = format!("{:?}", key);
        assert_eq!(debug_output, "PartnerKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_api_host_accepts_bare_host() {
        let host = ApiHost::new("partner.shopeemobile.com").unwrap();
        assert_eq!(host.as_ref(), "partner.shopeemobile.com");
        assert_eq!(host.base_url(), "https://partner.shopeemobile.com");
    }

    #[test]
    fn test_api_host_accepts_full_url() {
        let host = ApiHost::new("http://localhost:3000").unwrap();
        assert_eq!(host.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_api_host_strips_trailing_slash() {
        let host = ApiHost::new("http://localhost:3000/").unwrap();
        assert_eq!(host.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_api_host_rejects_invalid() {
        assert!(ApiHost::new("").is_err());
        assert!(ApiHost::new("   ").is_err());
        assert!(ApiHost::new("partner host.com").is_err());
        assert!(ApiHost::new("https://").is_err());
    }

    #[test]
    fn test_production_host_constant() {
        let host = ApiHost::production();
        assert_eq!(host.as_ref(), "partner.shopeemobile.com");
    }
}
