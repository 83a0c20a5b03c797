//! Inbound API-key validation for services embedding the SDK.
//!
//! Services that expose the SDK's operations over their own HTTP surface
//! typically gate inbound requests on a shared API key (an `x-api-key`
//! header). [`ApiKeyGuard`] validates such a key with constant-time
//! comparison.
//!
//! Running without a key is an explicit opt-in via
//! [`ApiKeyGuard::disabled`] — never a silent fallback when no key happens
//! to be configured.

use crate::auth::signature::constant_time_compare;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors produced when an inbound request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The request carried no API key.
    #[error("Missing API key")]
    MissingApiKey,

    /// The request carried a key that does not match.
    #[error("Invalid API key")]
    InvalidApiKey,
}

#[derive(Debug)]
enum Mode {
    Required(String),
    Disabled,
}

/// Validates the inbound API key of requests reaching the embedding service.
///
/// # Example
///
/// ```rust
/// use shopee_partner_api::auth::guard::{ApiKeyGuard, GuardError};
///
/// let guard = ApiKeyGuard::new("inbound-secret").unwrap();
/// assert!(guard.verify(Some("inbound-secret")).is_ok());
/// assert_eq!(guard.verify(None), Err(GuardError::MissingApiKey));
/// assert_eq!(guard.verify(Some("wrong")), Err(GuardError::InvalidApiKey));
/// ```
#[derive(Debug)]
pub struct ApiKeyGuard {
    mode: Mode,
}

impl ApiKeyGuard {
    /// Creates a guard requiring the given key on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyInboundApiKey`] if the key is empty: an
    /// empty key would match empty headers, which is never intended.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyInboundApiKey);
        }
        Ok(Self {
            mode: Mode::Required(key),
        })
    }

    /// Creates a guard that accepts every request.
    ///
    /// This is intended for local development only and must be chosen
    /// deliberately; the construction is logged so an unauthenticated
    /// deployment is visible.
    #[must_use]
    pub fn disabled() -> Self {
        tracing::warn!("inbound API key validation disabled; all requests will be accepted");
        Self {
            mode: Mode::Disabled,
        }
    }

    /// Returns `true` if validation is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self.mode, Mode::Disabled)
    }

    /// Validates the key presented by an inbound request.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::MissingApiKey`] when no key was presented and
    /// [`GuardError::InvalidApiKey`] when the presented key does not match.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), GuardError> {
        match &self.mode {
            Mode::Disabled => Ok(()),
            Mode::Required(expected) => {
                let presented = presented.ok_or(GuardError::MissingApiKey)?;
                if constant_time_compare(expected, presented) {
                    Ok(())
                } else {
                    Err(GuardError::InvalidApiKey)
                }
            }
        }
    }
}
